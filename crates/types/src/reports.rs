//! Report type definitions for operations

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a batch operated on, used in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Tables,
    Folders,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables => write!(f, "tables"),
            Self::Folders => write!(f, "folders"),
        }
    }
}

/// Accumulated outcome of one batch.
///
/// `skipped` counts items that were only reported because of `--dry-run`;
/// they are never part of `changed` or `failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTally {
    pub changed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl OperationTally {
    /// Items that reached a mutation attempt or a safety rejection
    #[must_use]
    pub fn processed(&self) -> usize {
        self.changed + self.failed
    }

    /// Every item the batch looked at
    #[must_use]
    pub fn total(&self) -> usize {
        self.changed + self.failed + self.skipped
    }

    /// One-line summary, e.g. `Processed 3 tables: Changed=2; Failed=1`
    #[must_use]
    pub fn summary(&self, kind: ItemKind) -> String {
        let mut line = format!(
            "Processed {} {kind}: Changed={}; Failed={}",
            self.processed(),
            self.changed,
            self.failed
        );
        if self.skipped > 0 {
            line.push_str(&format!("; Skipped={}", self.skipped));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let tally = OperationTally {
            changed: 2,
            failed: 1,
            skipped: 0,
        };
        assert_eq!(
            tally.summary(ItemKind::Tables),
            "Processed 3 tables: Changed=2; Failed=1"
        );
    }

    #[test]
    fn test_summary_mentions_skipped() {
        let tally = OperationTally {
            changed: 0,
            failed: 0,
            skipped: 4,
        };
        assert_eq!(
            tally.summary(ItemKind::Folders),
            "Processed 0 folders: Changed=0; Failed=0; Skipped=4"
        );
        assert_eq!(tally.total(), 4);
    }
}
