use serde::{Deserialize, Serialize};

// Declare all domain modules
pub mod folder;
pub mod general;
pub mod table;

// Re-export all domain events
pub use folder::*;
pub use general::*;
pub use table::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Table classification and DDL execution events
    Table(TableEvent),

    /// Upload-folder scanning and quarantine events
    Folder(FolderEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Warning { .. })
            | Self::Table(TableEvent::StatementFailed { .. })
            | Self::Folder(FolderEvent::MoveFailed { .. } | FolderEvent::MoveRejected { .. }) => {
                Level::WARN
            }

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Table(TableEvent::Classified { .. } | TableEvent::LimitApplied { .. })
            | Self::Folder(
                FolderEvent::SourceDirMissing { .. } | FolderEvent::Classified { .. },
            ) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "mso::events::general",
            Self::Table(_) => "mso::events::table",
            Self::Folder(_) => "mso::events::folder",
        }
    }
}
