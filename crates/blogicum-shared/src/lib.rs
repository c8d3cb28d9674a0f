//! # Blogicum Shared
//!
//! Wire types of the HTTP API: request and response bodies, and RFC 7807
//! problem documents.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
