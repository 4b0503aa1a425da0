//! Database and tenant registry error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StateError {
    #[error("database error: {message}")]
    DatabaseError { message: String },

    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("statement failed: {sql}: {message}")]
    StatementFailed { sql: String, message: String },

    #[error("table not found: {table}")]
    TableNotFound { table: String },

    #[error("table already exists: {table}")]
    TableExists { table: String },

    #[error("not a multisite installation: {table} is missing from schema {schema}")]
    NotMultisite { schema: String, table: String },
}

impl UserFacingError for StateError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ConnectionFailed { .. } => {
                Some("Check the database URL and that the server is reachable.")
            }
            Self::NotMultisite { .. } => {
                Some("This command is for multisite installations only; check the table prefix.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DatabaseError { .. } => "state.database_error",
            Self::ConnectionFailed { .. } => "state.connection_failed",
            Self::StatementFailed { .. } => "state.statement_failed",
            Self::TableNotFound { .. } => "state.table_not_found",
            Self::TableExists { .. } => "state.table_exists",
            Self::NotMultisite { .. } => "state.not_multisite",
        };
        Some(code)
    }
}
