//! System setup and component initialization

use crate::error::CliError;
use mso_config::Config;
use mso_events::EventSender;
use mso_guard::{hook_for, AccessDenyHook};
use mso_ops::{OpsContextBuilder, OpsCtx, OrphanLayout};
use mso_state::{create_pool, MySqlDatabase, PoolSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Connected collaborators for one invocation
pub struct SystemSetup {
    db: Arc<MySqlDatabase>,
    layout: OrphanLayout,
    deny: Arc<dyn AccessDenyHook>,
}

impl SystemSetup {
    /// Connect to the database and compute the layout
    pub async fn initialize(config: &Config) -> Result<Self, CliError> {
        info!("Initializing mso components");

        let layout = OrphanLayout::from_config(config)?;
        debug!(?layout, "layout");

        let settings = PoolSettings {
            max_connections: config.database.max_connections,
            connect_timeout: Duration::from_secs(config.database.connect_timeout_secs),
        };
        let pool = create_pool(config.database_url()?, settings).await?;
        let db = MySqlDatabase::with_pool(
            pool,
            config.database.schema.clone(),
            config.database.table_prefix.clone(),
        )
        .await?;

        let deny = hook_for(config.quarantine.deny_marker);
        debug!(hook = deny.name(), "access-deny hook");

        info!("System initialization completed");
        Ok(Self {
            db: Arc::new(db),
            layout,
            deny,
        })
    }

    /// Build the operations context
    pub fn ops_context(&self, tx: EventSender) -> Result<OpsCtx, CliError> {
        let ctx = OpsContextBuilder::new()
            .with_backend(self.db.clone())
            .with_layout(self.layout.clone())
            .with_deny_hook(self.deny.clone())
            .with_event_sender(tx)
            .build()?;
        Ok(ctx)
    }

    /// Close the connection pool
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
