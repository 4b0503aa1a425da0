//! Table-name classification and DDL statements

use crate::tenant::TenantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extract the tenant id embedded in a tenant-scoped table name.
///
/// Strips `prefix`, then takes everything up to the first `_`. Returns `None`
/// when the prefix does not match, there is no `_`, or the segment is not a
/// non-zero ASCII number. `wp_22_options` with prefix `wp_` yields 22.
#[must_use]
pub fn tenant_id_from_table_name(table: &str, prefix: &str) -> Option<TenantId> {
    let rest = table.strip_prefix(prefix)?;
    let (segment, _) = rest.split_once('_')?;
    TenantId::parse_segment(segment)
}

/// Name patterns the catalog can be asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TablePattern {
    /// `<prefix>[0-9]+_` at the start of the name
    TenantScoped { prefix: String },
    /// Exactly `<stem>_<lowercase hex>`, where the stem is `<prefix><label>`
    Relabeled { stem: String },
}

impl TablePattern {
    /// Match a table name in-process.
    #[must_use]
    pub fn matches(&self, table: &str) -> bool {
        match self {
            Self::TenantScoped { prefix } => table
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.split_once('_'))
                .is_some_and(|(digits, _)| {
                    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
                }),
            Self::Relabeled { stem } => table
                .strip_prefix(stem.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .is_some_and(|digest| {
                    !digest.is_empty()
                        && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
                }),
        }
    }
}

/// A literal DDL statement produced from a table name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Drop { table: String },
    Rename { from: String, to: String },
}

impl Statement {
    /// The table the statement acts on
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Drop { table } => table,
            Self::Rename { from, .. } => from,
        }
    }

    #[must_use]
    pub fn is_rename(&self) -> bool {
        matches!(self, Self::Rename { .. })
    }

    /// SQL text sent to the server
    #[must_use]
    pub fn sql(&self) -> String {
        match self {
            Self::Drop { table } => format!("DROP TABLE IF EXISTS {};", quote_identifier(table)),
            Self::Rename { from, to } => format!(
                "RENAME TABLE {} TO {};",
                quote_identifier(from),
                quote_identifier(to)
            ),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

/// Backtick-quote a MySQL identifier, doubling embedded backticks
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_tenant_id() {
        assert_eq!(
            tenant_id_from_table_name("wp_22_options", "wp_").map(TenantId::get),
            Some(22)
        );
        assert_eq!(
            tenant_id_from_table_name("wp_3682_term_relationships", "wp_").map(TenantId::get),
            Some(3682)
        );
    }

    #[test]
    fn test_malformed_names_have_no_id() {
        assert!(tenant_id_from_table_name("wp_options", "wp_").is_none());
        assert!(tenant_id_from_table_name("wp_22", "wp_").is_none());
        assert!(tenant_id_from_table_name("wp_0_options", "wp_").is_none());
        assert!(tenant_id_from_table_name("wp_2x_options", "wp_").is_none());
        assert!(tenant_id_from_table_name("other_22_options", "wp_").is_none());
        assert!(tenant_id_from_table_name("wp__options", "wp_").is_none());
    }

    #[test]
    fn test_tenant_pattern() {
        let pattern = TablePattern::TenantScoped {
            prefix: "wp_".into(),
        };
        assert!(pattern.matches("wp_1_options"));
        assert!(pattern.matches("wp_0_options"));
        assert!(!pattern.matches("wp_users"));
        assert!(!pattern.matches("wp_label_abcd1234"));
        assert!(!pattern.matches("xwp_1_options"));
    }

    #[test]
    fn test_relabeled_pattern_is_literal() {
        let pattern = TablePattern::Relabeled {
            stem: "wp_label".into(),
        };
        assert!(pattern.matches("wp_label_abcd1234"));
        assert!(!pattern.matches("wpXlabel_abcd1234"));
    }

    #[test]
    fn test_relabeled_pattern_needs_hex_digest() {
        let pattern = TablePattern::Relabeled {
            stem: "wp_site".into(),
        };
        assert!(pattern.matches("wp_site_0123456789abcdef"));
        assert!(!pattern.matches("wp_site"));
        assert!(!pattern.matches("wp_sitemeta"));
        assert!(!pattern.matches("wp_site_"));
        assert!(!pattern.matches("wp_site_meta"));
        assert!(!pattern.matches("wp_site_ABCDEF"));
        assert!(!pattern.matches("wp_site_abcd_1"));
    }

    #[test]
    fn test_statement_sql() {
        let drop = Statement::Drop {
            table: "wp_9_options".into(),
        };
        assert_eq!(drop.sql(), "DROP TABLE IF EXISTS `wp_9_options`;");

        let rename = Statement::Rename {
            from: "wp_9_options".into(),
            to: "wp_label_abc".into(),
        };
        assert_eq!(
            rename.to_string(),
            "RENAME TABLE `wp_9_options` TO `wp_label_abc`;"
        );
        assert!(rename.is_rename());
        assert_eq!(rename.table(), "wp_9_options");
    }

    #[test]
    fn test_quote_identifier_escapes_backticks() {
        assert_eq!(quote_identifier("a`b"), "`a``b`");
    }
}
