//! # Blogicum Core
//!
//! The domain layer of Blogicum.
//! Entities, the post visibility policy, feed composition and content
//! mutation rules live here; storage and transport are reached through
//! the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
