//! Storage and filesystem-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("directory could not be prepared: {path}: {message}")]
    DirectoryUnavailable { path: String, message: String },

    #[error("rename failed: {from} -> {to}: {message}")]
    AtomicRenameFailed {
        from: String,
        to: String,
        message: String,
    },
}

impl StorageError {
    /// Wrap a failed `rename(2)` of `from` onto `to`
    #[must_use]
    pub fn rename_failed(err: &std::io::Error, from: &std::path::Path, to: &std::path::Path) -> Self {
        Self::AtomicRenameFailed {
            from: from.display().to_string(),
            to: to.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DirectoryUnavailable { .. } => {
                Some("Adjust filesystem permissions on the uploads directory or run as its owner.")
            }
            Self::AtomicRenameFailed { .. } => {
                Some("The quarantine must be on the same filesystem as the uploads directory.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DirectoryUnavailable { .. } => "storage.directory_unavailable",
            Self::AtomicRenameFailed { .. } => "storage.atomic_rename_failed",
        };
        Some(code)
    }
}
