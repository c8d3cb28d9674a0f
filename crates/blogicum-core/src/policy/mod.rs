//! Access rules: who may see a post, and who may change it.

pub mod capability;
pub mod visibility;

pub use capability::{Owned, can_mutate, ensure_can_mutate};
pub use visibility::{PostFilter, Scope, Visibility, can_view, is_live};
