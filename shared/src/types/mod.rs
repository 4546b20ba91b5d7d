//! Type definitions shared by every layer
//!
//! - `pagination` - page parameters and paged payloads for list endpoints
//! - `response` - the `{success, data|error}` envelope

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{ApiResponse, ErrorDetail};
