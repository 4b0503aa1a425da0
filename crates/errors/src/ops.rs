//! Operation orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum OpsError {
    #[error("component not found: {component}")]
    MissingComponent { component: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("quarantine directory unavailable: {path}: {message}")]
    QuarantineUnavailable { path: String, message: String },

    #[error("access protection failed for {path}: {message}")]
    AccessProtectionFailed { path: String, message: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::QuarantineUnavailable { .. } | Self::AccessProtectionFailed { .. } => Some(
                "Make sure the uploads directory is writable by the user running this command.",
            ),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MissingComponent { .. } => "ops.missing_component",
            Self::SerializationError { .. } => "ops.serialization_error",
            Self::QuarantineUnavailable { .. } => "ops.quarantine_unavailable",
            Self::AccessProtectionFailed { .. } => "ops.access_protection_failed",
        };
        Some(code)
    }
}
