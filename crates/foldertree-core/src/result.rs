//! Convenience result type alias for the folder tree workspace.

use crate::error::AppError;

/// A specialized `Result` type for folder tree operations.
pub type AppResult<T> = Result<T, AppError>;
