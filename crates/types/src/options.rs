//! Run options shared by every mutating operation

use serde::{Deserialize, Serialize};

/// Immutable `--dry-run` / `--limit` pair built once per invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Report intended actions without mutating anything
    pub dry_run: bool,
    /// `0` = all items, `> 0` = first N items, `< 0` = invalid, nothing is processed
    pub limit: i64,
}

impl RunOptions {
    #[must_use]
    pub fn new(dry_run: bool, limit: i64) -> Self {
        Self { dry_run, limit }
    }

    /// Whether the limit is usable at all
    #[must_use]
    pub fn is_valid_limit(&self) -> bool {
        self.limit >= 0
    }

    /// The leading slice of `items` selected by the limit
    #[must_use]
    pub fn select<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match usize::try_from(self.limit) {
            Err(_) => &[],
            Ok(0) => items,
            Ok(n) => &items[..n.min(items.len())],
        }
    }
}
