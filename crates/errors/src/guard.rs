//! Path-safety error types for the quarantine guard

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Reasons a folder is refused by the quarantine guard.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum GuardError {
    #[error("refusing to move the uploads root itself: {path}")]
    IsUploadsRoot { path: String },

    #[error("{path} is not inside the uploads root {root}")]
    OutsideUploadsRoot { path: String, root: String },

    #[error("{path} is already inside the quarantine root {root}")]
    InsideQuarantine { path: String, root: String },

    #[error("destination {destination} does not resolve inside the quarantine root {root}")]
    DestinationEscapes { destination: String, root: String },

    #[error("destination already exists: {destination}")]
    DestinationExists { destination: String },

    #[error("cannot resolve {path}: {message}")]
    Unresolvable { path: String, message: String },
}

impl UserFacingError for GuardError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::IsUploadsRoot { .. } => "guard.is_uploads_root",
            Self::OutsideUploadsRoot { .. } => "guard.outside_uploads_root",
            Self::InsideQuarantine { .. } => "guard.inside_quarantine",
            Self::DestinationEscapes { .. } => "guard.destination_escapes",
            Self::DestinationExists { .. } => "guard.destination_exists",
            Self::Unresolvable { .. } => "guard.unresolvable",
        };
        Some(code)
    }
}
