//! REST API: router, error mapping, extractors, and handlers.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ApiResult};
pub use router::create_router;
