pub mod error;

pub use error::{
    json_error_handler, method_not_allowed, path_error_handler, query_error_handler, ApiError,
};
