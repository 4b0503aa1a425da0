//! In-memory catalog and registry

use crate::{Database, TenantRegistry};
use async_trait::async_trait;
use mso_errors::{Error, StateError};
use mso_types::{Statement, TablePattern, TenantId};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Schema held in a set of table names
///
/// Behaves like the server for `DROP TABLE IF EXISTS` and `RENAME TABLE`.
/// Tables registered with [`MemoryDatabase::with_failing`] make every
/// statement touching them fail.
#[derive(Debug)]
pub struct MemoryDatabase {
    schema: String,
    prefix: String,
    multisite: bool,
    tenants: Vec<TenantId>,
    failing: BTreeSet<String>,
    tables: Mutex<BTreeSet<String>>,
    executed: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MemoryDatabase {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            schema: "memory".to_string(),
            prefix: prefix.into(),
            multisite: true,
            tenants: Vec::new(),
            failing: BTreeSet::new(),
            tables: Mutex::new(BTreeSet::new()),
            executed: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_tables<I, S>(self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.tables).extend(tables.into_iter().map(Into::into));
        self
    }

    /// Registered tenants; zero is ignored like the real registry does
    #[must_use]
    pub fn with_tenants(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.tenants = ids.into_iter().filter_map(TenantId::new).collect();
        self.tenants.sort();
        self
    }

    #[must_use]
    pub fn with_failing(mut self, table: impl Into<String>) -> Self {
        self.failing.insert(table.into());
        self
    }

    /// Pretend the tenant table is absent
    #[must_use]
    pub fn single_site(mut self) -> Self {
        self.multisite = false;
        self
    }

    /// Current table names, ascending
    #[must_use]
    pub fn tables(&self) -> Vec<String> {
        lock(&self.tables).iter().cloned().collect()
    }

    /// Number of `execute` calls, including failed ones
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// SQL of statements that succeeded, in order
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        lock(&self.executed).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Database for MemoryDatabase {
    fn schema_name(&self) -> &str {
        &self.schema
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    async fn list_tables(&self, pattern: &TablePattern) -> Result<Vec<String>, Error> {
        Ok(lock(&self.tables)
            .iter()
            .filter(|name| pattern.matches(name))
            .cloned()
            .collect())
    }

    async fn execute(&self, statement: &Statement) -> Result<bool, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let sql = statement.sql();

        if self.failing.contains(statement.table()) {
            return Err(StateError::StatementFailed {
                sql,
                message: "table is locked".to_string(),
            }
            .into());
        }

        let mut tables = lock(&self.tables);
        match statement {
            Statement::Drop { table } => {
                tables.remove(table);
            }
            Statement::Rename { from, to } => {
                if tables.contains(to) {
                    return Err(StateError::TableExists { table: to.clone() }.into());
                }
                if !tables.remove(from) {
                    return Err(StateError::TableNotFound {
                        table: from.clone(),
                    }
                    .into());
                }
                tables.insert(to.clone());
            }
        }
        drop(tables);

        lock(&self.executed).push(sql);
        Ok(true)
    }
}

#[async_trait]
impl TenantRegistry for MemoryDatabase {
    async fn is_multisite(&self) -> Result<bool, Error> {
        Ok(self.multisite)
    }

    async fn list_tenant_ids(&self) -> Result<Vec<TenantId>, Error> {
        Ok(self.tenants.clone())
    }
}
