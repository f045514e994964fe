//! Result type alias for dbapi

use super::errors::AppError;

/// Result type alias for dbapi operations
///
/// # Examples
///
/// ```
/// use dbapi::domain::result::Result;
/// use dbapi::domain::errors::AppError;
///
/// fn failing_function() -> Result<()> {
///     Err(AppError::Logging("log file is not writable".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;
