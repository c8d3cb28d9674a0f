//! Observability module - per-request correlation ids.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};
