#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! Database access for mso
//!
//! Two seams: [`Database`] reads the schema catalog and executes DDL, and
//! [`TenantRegistry`] answers which tenants currently exist. Both are
//! implemented for `MySQL` over `sqlx`; the `testing` feature adds an
//! in-memory implementation.

#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod mysql;

#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryDatabase;
pub use mysql::{create_pool, MySqlDatabase, PoolSettings};

use async_trait::async_trait;
use mso_errors::Error;
use mso_types::{Statement, TablePattern, TenantId, TenantSet};

/// Schema catalog and DDL execution
#[async_trait]
pub trait Database: Send + Sync {
    /// Schema whose tables are inspected
    fn schema_name(&self) -> &str;

    /// Table prefix of the installation, e.g. `wp_`
    fn table_prefix(&self) -> &str;

    /// Table names in the schema matching `pattern`, ascending
    async fn list_tables(&self, pattern: &TablePattern) -> Result<Vec<String>, Error>;

    /// Send one statement to the server
    ///
    /// `Ok(true)` means the server accepted it. An error means it did not.
    async fn execute(&self, statement: &Statement) -> Result<bool, Error>;
}

/// Source of truth for registered tenants
#[async_trait]
pub trait TenantRegistry: Send + Sync {
    /// Whether the schema carries the tenant table at all
    async fn is_multisite(&self) -> Result<bool, Error>;

    /// Every registered tenant id, ascending
    async fn list_tenant_ids(&self) -> Result<Vec<TenantId>, Error>;

    /// Snapshot of the registry as a set
    async fn tenant_set(&self) -> Result<TenantSet, Error> {
        Ok(self.list_tenant_ids().await?.into_iter().collect())
    }
}

/// Escape regex metacharacters for `REGEXP`
#[must_use]
pub fn escape_regex(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len() + 4);
    for c in literal.chars() {
        if "\\.^$|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
