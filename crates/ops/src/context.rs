//! Operations context for dependency injection

use crate::layout::OrphanLayout;
use mso_errors::{Error, OpsError};
use mso_events::{EventEmitter, EventSender};
use mso_guard::{AccessDenyHook, HtaccessDeny};
use mso_state::{Database, TenantRegistry};
use std::sync::Arc;

/// Operations context providing access to all collaborators
pub struct OpsCtx {
    /// Schema catalog and DDL execution
    pub db: Arc<dyn Database>,
    /// Registered tenants
    pub tenants: Arc<dyn TenantRegistry>,
    /// Roots, label and prefix
    pub layout: OrphanLayout,
    /// Protection applied to the quarantine root
    pub deny: Arc<dyn AccessDenyHook>,
    /// Event sender for progress reporting
    pub tx: EventSender,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    db: Option<Arc<dyn Database>>,
    tenants: Option<Arc<dyn TenantRegistry>>,
    layout: Option<OrphanLayout>,
    deny: Option<Arc<dyn AccessDenyHook>>,
    tx: Option<EventSender>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            db: None,
            tenants: None,
            layout: None,
            deny: None,
            tx: None,
        }
    }

    /// Set the database
    #[must_use]
    pub fn with_database(mut self, db: Arc<dyn Database>) -> Self {
        self.db = Some(db);
        self
    }

    /// Set the tenant registry
    #[must_use]
    pub fn with_registry(mut self, tenants: Arc<dyn TenantRegistry>) -> Self {
        self.tenants = Some(tenants);
        self
    }

    /// Use one backend for both the catalog and the registry
    #[must_use]
    pub fn with_backend<B>(self, backend: Arc<B>) -> Self
    where
        B: Database + TenantRegistry + 'static,
    {
        self.with_database(backend.clone()).with_registry(backend)
    }

    /// Set the layout
    #[must_use]
    pub fn with_layout(mut self, layout: OrphanLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the access-deny hook; defaults to `.htaccess`
    #[must_use]
    pub fn with_deny_hook(mut self, deny: Arc<dyn AccessDenyHook>) -> Self {
        self.deny = Some(deny);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let db = self.db.ok_or_else(|| OpsError::MissingComponent {
            component: "database".to_string(),
        })?;

        let tenants = self.tenants.ok_or_else(|| OpsError::MissingComponent {
            component: "tenant_registry".to_string(),
        })?;

        let layout = self.layout.ok_or_else(|| OpsError::MissingComponent {
            component: "layout".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        let deny = self.deny.unwrap_or_else(|| Arc::new(HtaccessDeny));

        Ok(OpsCtx {
            db,
            tenants,
            layout,
            deny,
            tx,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
