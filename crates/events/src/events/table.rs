use mso_types::OperationTally;
use serde::{Deserialize, Serialize};

/// Table classification and DDL execution events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    /// Catalog scan finished
    Classified {
        candidates: usize,
        orphans: usize,
        tenants: usize,
    },

    /// The limit cut the statement list down
    LimitApplied { selected: usize, total: usize },

    /// Statement executed and counted as changed
    StatementApplied { sql: String },

    /// Statement executed but counted as failed
    StatementFailed { sql: String, error: String },

    /// Statement only reported because of `--dry-run`
    StatementSkipped { sql: String },

    /// Whole statement batch finished
    BatchCompleted { tally: OperationTally },
}
