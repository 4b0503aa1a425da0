//! Fixed names and defaults for mso
//!
//! Anything here that a site might want to change is also exposed through
//! `config.toml`; these are only the fallbacks.

pub const APP_NAME: &str = "mso";
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_TABLE_PREFIX: &str = "wp_";
pub const DEFAULT_LABEL: &str = "WP_Multisite_Orphans";

/// Subdirectories of the uploads root scanned for tenant folders.
/// The empty entry is the uploads root itself.
pub const DEFAULT_SOURCE_DIRS: &[&str] = &["", "sites"];

/// Name of the table holding registered tenants, appended to the prefix
pub const TENANT_TABLE: &str = "blogs";

/// MySQL identifier length limit
pub const MAX_IDENTIFIER_LEN: usize = 64;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 2;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
