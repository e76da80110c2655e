//! Error module containing error types

mod pipeline_error;

pub use pipeline_error::PipelineError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
