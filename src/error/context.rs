//! Context helpers for turning foreign errors into `TaskSheetError`.

use super::{Result, TaskSheetError};

/// Attach a human-readable context string to a fallible operation.
pub trait ResultExt<T> {
    /// Wrap the error with a fixed context message.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`TaskSheetError::WithContext`].
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Wrap the error with a lazily built context message.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`TaskSheetError::WithContext`].
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| TaskSheetError::WithContext {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| TaskSheetError::WithContext {
            context: f().into(),
            source: Box::new(source),
        })
    }
}
