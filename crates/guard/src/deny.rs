//! Web access denial for the quarantine root

use async_trait::async_trait;
use mso_config::DenyMarker;
use mso_errors::{Error, OpsError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

pub const HTACCESS_FILE: &str = ".htaccess";

/// Apache 2.4 rule with a fallback for 2.2
pub const HTACCESS_DENY_ALL: &str = "<IfModule mod_authz_core.c>
    Require all denied
</IfModule>
<IfModule !mod_authz_core.c>
    Order deny,allow
    Deny from all
</IfModule>
";

/// Keeps the web server from serving quarantined uploads
#[async_trait]
pub trait AccessDenyHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Protect `dir`. Returns the marker path when one was written.
    async fn protect(&self, dir: &Path) -> Result<Option<PathBuf>, Error>;
}

/// Drops a deny-all `.htaccess` unless one is already there
#[derive(Debug, Clone, Copy, Default)]
pub struct HtaccessDeny;

#[async_trait]
impl AccessDenyHook for HtaccessDeny {
    fn name(&self) -> &'static str {
        "htaccess"
    }

    async fn protect(&self, dir: &Path) -> Result<Option<PathBuf>, Error> {
        let marker = dir.join(HTACCESS_FILE);
        let failed = |e: std::io::Error| -> Error {
            OpsError::AccessProtectionFailed {
                path: marker.display().to_string(),
                message: e.to_string(),
            }
            .into()
        };

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&marker)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => return Err(failed(e)),
        };

        file.write_all(HTACCESS_DENY_ALL.as_bytes())
            .await
            .map_err(failed)?;
        file.flush().await.map_err(failed)?;

        Ok(Some(marker))
    }
}

/// For servers that are configured some other way
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeny;

#[async_trait]
impl AccessDenyHook for NoDeny {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn protect(&self, _dir: &Path) -> Result<Option<PathBuf>, Error> {
        Ok(None)
    }
}

/// Hook selected by configuration
#[must_use]
pub fn hook_for(marker: DenyMarker) -> Arc<dyn AccessDenyHook> {
    match marker {
        DenyMarker::Htaccess => Arc::new(HtaccessDeny),
        DenyMarker::None => Arc::new(NoDeny),
    }
}
