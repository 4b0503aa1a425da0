//! `MySQL` / `MariaDB` backend

use crate::{escape_regex, Database, TenantRegistry};
use async_trait::async_trait;
use mso_errors::{ConfigError, Error, StateError};
use mso_types::{table::quote_identifier, Statement, TablePattern, TenantId};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool, Row};
use std::time::Duration;

/// Connection pool settings
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 2,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Create a new `MySQL` connection pool
///
/// # Errors
///
/// Returns an error if the URL is invalid or the server cannot be reached.
pub async fn create_pool(url: &str, settings: PoolSettings) -> Result<Pool<MySql>, Error> {
    MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect(url)
        .await
        .map_err(|e| {
            StateError::ConnectionFailed {
                message: e.to_string(),
            }
            .into()
        })
}

/// Catalog and registry backed by a live schema
#[derive(Debug, Clone)]
pub struct MySqlDatabase {
    pool: Pool<MySql>,
    schema: String,
    prefix: String,
}

impl MySqlDatabase {
    /// Wrap a pool. When `schema` is `None` the connection's default
    /// database is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the default database cannot be queried or none is
    /// selected.
    pub async fn with_pool(
        pool: Pool<MySql>,
        schema: Option<String>,
        prefix: impl Into<String>,
    ) -> Result<Self, Error> {
        let schema = match schema {
            Some(schema) => schema,
            None => {
                let current: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
                    .fetch_one(&pool)
                    .await?;
                current.ok_or_else(|| ConfigError::MissingField {
                    field: "database.schema".to_string(),
                })?
            }
        };
        tracing::debug!(%schema, "using schema");

        Ok(Self {
            pool,
            schema,
            prefix: prefix.into(),
        })
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn tenant_table(&self) -> String {
        format!("{}blogs", self.prefix)
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    fn schema_name(&self) -> &str {
        &self.schema
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    async fn list_tables(&self, pattern: &TablePattern) -> Result<Vec<String>, Error> {
        // information_schema columns can come back as binary strings on MySQL 8
        let rows = match pattern {
            TablePattern::TenantScoped { prefix } => {
                sqlx::query(
                    "SELECT CAST(table_name AS CHAR) AS name FROM information_schema.tables \
                     WHERE table_schema = ? AND table_name REGEXP ? ORDER BY table_name",
                )
                .bind(&self.schema)
                .bind(format!("^{}[0-9]+_", escape_regex(prefix)))
                .fetch_all(&self.pool)
                .await?
            }
            TablePattern::Relabeled { stem } => {
                sqlx::query(
                    "SELECT CAST(table_name AS CHAR) AS name FROM information_schema.tables \
                     WHERE table_schema = ? AND table_name REGEXP ? ORDER BY table_name",
                )
                .bind(&self.schema)
                .bind(format!("^{}_[0-9a-f]+$", escape_regex(stem)))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("name")?;
            if pattern.matches(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn execute(&self, statement: &Statement) -> Result<bool, Error> {
        let sql = statement.sql();
        tracing::debug!(%sql, "executing");
        sqlx::raw_sql(&sql)
            .execute(&self.pool)
            .await
            .map(|_| true)
            .map_err(|e| {
                StateError::StatementFailed {
                    sql: sql.clone(),
                    message: e.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl TenantRegistry for MySqlDatabase {
    async fn is_multisite(&self) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ?",
        )
        .bind(&self.schema)
        .bind(self.tenant_table())
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn list_tenant_ids(&self) -> Result<Vec<TenantId>, Error> {
        // blog_id is a signed BIGINT in stock installs, unsigned in some forks
        let sql = format!(
            "SELECT CAST(blog_id AS SIGNED) FROM {} ORDER BY blog_id",
            quote_identifier(&self.tenant_table())
        );
        let ids: Vec<BlogId> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Ok(tenant_ids(ids))
    }
}

/// Decoded type of the registry's `blog_id` column
type BlogId = i64;

/// Registered tenant ids; zero and negative ids are never tenants
fn tenant_ids(ids: impl IntoIterator<Item = BlogId>) -> Vec<TenantId> {
    ids.into_iter()
        .filter_map(|id| u64::try_from(id).ok())
        .filter_map(TenantId::new)
        .collect()
}
