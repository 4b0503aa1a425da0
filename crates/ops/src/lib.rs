#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations for mso
//!
//! This crate sits between the CLI and the collaborator crates. Operations
//! never print: they return data, emit events, and leave rendering to the
//! caller.

mod context;
mod executor;
mod folders;
mod layout;
mod tables;

pub use context::{OpsContextBuilder, OpsCtx};
pub use executor::execute;
pub use folders::{list_moved_folders, list_orphan_folders, move_folders, move_orphan_folders};
pub use layout::{ensure_multisite, show_label, show_source_dirs, show_target_dir, OrphanLayout};
pub use tables::{
    build_drop, build_rename, drop_orphan_tables, drop_renamed_tables, list_orphan_tables,
    list_renamed_tables, planned_drops, planned_renamed_drops, planned_renames,
    rename_orphan_tables, renamed_table_name,
};

use mso_errors::Error;
use mso_types::{ItemKind, OperationTally};
use std::path::PathBuf;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// The rename label
    Label(String),
    /// A single directory
    Path(PathBuf),
    /// Several directories
    Paths(Vec<PathBuf>),
    /// Table names
    Tables(Vec<String>),
    /// SQL statements
    Statements(Vec<String>),
    /// Upload folders
    Folders(Vec<PathBuf>),
    /// Outcome of a mutating batch
    Tally {
        kind: ItemKind,
        tally: OperationTally,
    },
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            mso_errors::OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Check if this is a success result
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Tally { tally, .. } => tally.failed == 0,
            _ => true,
        }
    }
}
