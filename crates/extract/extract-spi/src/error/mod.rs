//! Error module containing error types and result aliases

mod extract_error;

pub use extract_error::ExtractError;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
