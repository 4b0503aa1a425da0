//! Where things live: computed once per invocation

use crate::OpsCtx;
use mso_config::{constants, Config};
use mso_errors::{Error, StateError};
use serde::Serialize;
use std::path::PathBuf;

/// Roots, label and prefix shared by every operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanLayout {
    /// The installation's uploads base directory
    pub uploads_root: PathBuf,
    /// Directories scanned for tenant folders, absolute
    pub source_dirs: Vec<PathBuf>,
    /// `<uploads_root>/<label>`
    pub quarantine_root: PathBuf,
    pub label: String,
    pub table_prefix: String,
}

impl OrphanLayout {
    /// `source_dirs` are relative to `uploads_root`; an empty entry is the
    /// uploads root itself.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        uploads_root: impl Into<PathBuf>,
        source_dirs: &[S],
        label: impl Into<String>,
        table_prefix: impl Into<String>,
    ) -> Self {
        let uploads_root = uploads_root.into();
        let label = label.into();
        let source_dirs = source_dirs
            .iter()
            .map(|dir| match dir.as_ref() {
                "" => uploads_root.clone(),
                rel => uploads_root.join(rel),
            })
            .collect();
        let quarantine_root = uploads_root.join(&label);

        Self {
            uploads_root,
            source_dirs,
            quarantine_root,
            label,
            table_prefix: table_prefix.into(),
        }
    }

    /// Layout for a loaded, validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no uploads directory is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new(
            config.uploads_dir()?,
            &config.quarantine.source_dirs,
            config.quarantine.label.clone(),
            config.database.table_prefix.clone(),
        ))
    }

    /// `<prefix><label>`, the start of every relabeled table
    #[must_use]
    pub fn renamed_prefix(&self) -> String {
        format!("{}{}", self.table_prefix, self.label)
    }

    /// The tenant registry table, e.g. `wp_blogs`
    #[must_use]
    pub fn tenant_table(&self) -> String {
        format!("{}{}", self.table_prefix, constants::TENANT_TABLE)
    }

    /// Each source directory's counterpart inside the quarantine root
    #[must_use]
    pub fn quarantine_mirrors(&self) -> Vec<PathBuf> {
        self.source_dirs
            .iter()
            .filter_map(|dir| dir.strip_prefix(&self.uploads_root).ok())
            .map(|rel| self.quarantine_root.join(rel))
            .collect()
    }
}

/// The rename label
#[must_use]
pub fn show_label(ctx: &OpsCtx) -> String {
    ctx.layout.label.clone()
}

/// Directories scanned for orphan folders
#[must_use]
pub fn show_source_dirs(ctx: &OpsCtx) -> Vec<PathBuf> {
    ctx.layout.source_dirs.clone()
}

/// Where orphan folders are moved to
#[must_use]
pub fn show_target_dir(ctx: &OpsCtx) -> PathBuf {
    ctx.layout.quarantine_root.clone()
}

/// Fail unless the schema has a tenant registry table
///
/// # Errors
///
/// Returns [`StateError::NotMultisite`] for a single-site schema, or the
/// database error if the check itself fails.
pub async fn ensure_multisite(ctx: &OpsCtx) -> Result<(), Error> {
    if ctx.tenants.is_multisite().await? {
        return Ok(());
    }
    Err(StateError::NotMultisite {
        schema: ctx.db.schema_name().to_string(),
        table: ctx.layout.tenant_table(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = OrphanLayout::new("/srv/uploads", &["", "sites"], "Orphans", "wp_");
        assert_eq!(
            layout.source_dirs,
            vec![PathBuf::from("/srv/uploads"), PathBuf::from("/srv/uploads/sites")]
        );
        assert_eq!(layout.quarantine_root, PathBuf::from("/srv/uploads/Orphans"));
        assert_eq!(layout.renamed_prefix(), "wp_Orphans");
        assert_eq!(layout.tenant_table(), "wp_blogs");
        assert_eq!(
            layout.quarantine_mirrors(),
            vec![
                PathBuf::from("/srv/uploads/Orphans"),
                PathBuf::from("/srv/uploads/Orphans/sites")
            ]
        );
    }

    #[test]
    fn test_from_config_needs_uploads_dir() {
        let mut config = Config::default();
        assert!(OrphanLayout::from_config(&config).is_err());

        config.paths.uploads_dir = Some(PathBuf::from("/srv/uploads"));
        let layout = OrphanLayout::from_config(&config).unwrap();
        assert_eq!(layout.label, "WP_Multisite_Orphans");
        assert_eq!(
            layout.quarantine_root,
            PathBuf::from("/srv/uploads/WP_Multisite_Orphans")
        );
    }
}
