use mso_types::OperationTally;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upload-folder scanning and quarantine events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FolderEvent {
    /// A configured source directory does not exist
    SourceDirMissing { path: PathBuf },

    /// Source directories scanned
    Classified { scanned: usize, orphans: usize },

    /// Quarantine root exists and is writable
    QuarantinePrepared { path: PathBuf },

    /// Access-deny marker written into the quarantine root
    AccessProtected { path: PathBuf },

    /// Folder relocated into quarantine
    Moved { from: PathBuf, to: PathBuf },

    /// Rename of the folder failed
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Folder refused by a path-safety gate
    MoveRejected { path: PathBuf, reason: String },

    /// Folder only reported because of `--dry-run`
    MoveSkipped { from: PathBuf, to: PathBuf },

    /// Whole folder batch finished
    BatchCompleted { tally: OperationTally },
}
