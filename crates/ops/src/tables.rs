//! Orphan and relabeled tables

use crate::executor::execute;
use crate::layout::OrphanLayout;
use crate::OpsCtx;
use mso_config::constants::MAX_IDENTIFIER_LEN;
use mso_errors::Error;
use mso_events::{AppEvent, EventEmitter, TableEvent};
use mso_types::{
    tenant_id_from_table_name, OperationTally, RunOptions, Statement, TablePattern,
};

/// Tables named `<prefix><id>_...` whose id is not a registered tenant.
///
/// Sorted ascending. Names without a usable id are left out silently.
///
/// # Errors
///
/// Returns an error if the catalog or the registry cannot be read.
pub async fn list_orphan_tables(ctx: &OpsCtx) -> Result<Vec<String>, Error> {
    let prefix = &ctx.layout.table_prefix;
    let tenants = ctx.tenants.tenant_set().await?;
    let candidates = ctx
        .db
        .list_tables(&TablePattern::TenantScoped {
            prefix: prefix.clone(),
        })
        .await?;

    let mut orphans: Vec<String> = candidates
        .iter()
        .filter(|name| {
            tenant_id_from_table_name(name, prefix).is_some_and(|id| !tenants.contains(id))
        })
        .cloned()
        .collect();
    orphans.sort();

    ctx.emit(AppEvent::Table(TableEvent::Classified {
        candidates: candidates.len(),
        orphans: orphans.len(),
        tenants: tenants.len(),
    }));

    Ok(orphans)
}

/// Tables relabeled by an earlier run, sorted ascending
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn list_renamed_tables(ctx: &OpsCtx) -> Result<Vec<String>, Error> {
    let mut tables = ctx
        .db
        .list_tables(&TablePattern::Relabeled {
            stem: ctx.layout.renamed_prefix(),
        })
        .await?;
    tables.sort();
    Ok(tables)
}

/// `DROP TABLE IF EXISTS` for each name, order preserved
#[must_use]
pub fn build_drop(names: &[String]) -> Vec<Statement> {
    names
        .iter()
        .map(|table| Statement::Drop {
            table: table.clone(),
        })
        .collect()
}

/// `RENAME TABLE old TO <prefix><label>_<digest>` for each name
#[must_use]
pub fn build_rename(names: &[String], layout: &OrphanLayout) -> Vec<Statement> {
    names
        .iter()
        .map(|table| Statement::Rename {
            from: table.clone(),
            to: renamed_table_name(table, layout),
        })
        .collect()
}

/// New name for a relabeled table.
///
/// The digest takes whatever room the identifier limit leaves, within the
/// bounds [`mso_hash::name_digest`] enforces.
#[must_use]
pub fn renamed_table_name(original: &str, layout: &OrphanLayout) -> String {
    let stem = format!("{}_", layout.renamed_prefix());
    let budget = MAX_IDENTIFIER_LEN.saturating_sub(stem.len());
    format!("{stem}{}", mso_hash::name_digest(original, budget))
}

/// Statements `do-rename-tables` would run
///
/// # Errors
///
/// Returns an error if orphan tables cannot be listed.
pub async fn planned_renames(ctx: &OpsCtx) -> Result<Vec<Statement>, Error> {
    Ok(build_rename(&list_orphan_tables(ctx).await?, &ctx.layout))
}

/// Statements `do-drop-tables` would run
///
/// # Errors
///
/// Returns an error if orphan tables cannot be listed.
pub async fn planned_drops(ctx: &OpsCtx) -> Result<Vec<Statement>, Error> {
    Ok(build_drop(&list_orphan_tables(ctx).await?))
}

/// Statements `do-drop-renamed-tables` would run
///
/// # Errors
///
/// Returns an error if relabeled tables cannot be listed.
pub async fn planned_renamed_drops(ctx: &OpsCtx) -> Result<Vec<Statement>, Error> {
    Ok(build_drop(&list_renamed_tables(ctx).await?))
}

/// Relabel orphan tables so they drop out of the orphan listing
///
/// # Errors
///
/// Returns an error if orphan tables cannot be listed. Individual statement
/// failures are counted, not returned.
pub async fn rename_orphan_tables(
    ctx: &OpsCtx,
    options: RunOptions,
) -> Result<OperationTally, Error> {
    ctx.emit_operation_started("rename tables");
    let statements = planned_renames(ctx).await?;
    let tally = execute(ctx, &statements, options).await;
    ctx.emit_operation_completed("rename tables", tally.failed == 0);
    Ok(tally)
}

/// Drop orphan tables
///
/// # Errors
///
/// Returns an error if orphan tables cannot be listed.
pub async fn drop_orphan_tables(
    ctx: &OpsCtx,
    options: RunOptions,
) -> Result<OperationTally, Error> {
    ctx.emit_operation_started("drop tables");
    let statements = planned_drops(ctx).await?;
    let tally = execute(ctx, &statements, options).await;
    ctx.emit_operation_completed("drop tables", tally.failed == 0);
    Ok(tally)
}

/// Drop tables relabeled by an earlier run
///
/// # Errors
///
/// Returns an error if relabeled tables cannot be listed.
pub async fn drop_renamed_tables(
    ctx: &OpsCtx,
    options: RunOptions,
) -> Result<OperationTally, Error> {
    ctx.emit_operation_started("drop renamed tables");
    let statements = planned_renamed_drops(ctx).await?;
    let tally = execute(ctx, &statements, options).await;
    ctx.emit_operation_completed("drop renamed tables", tally.failed == 0);
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OrphanLayout {
        OrphanLayout::new("/srv/uploads", &["", "sites"], "label", "wp_")
    }

    #[test]
    fn test_build_drop_preserves_order() {
        let names = vec!["wp_9_options".to_string(), "wp_7_posts".to_string()];
        let sql: Vec<String> = build_drop(&names).iter().map(Statement::sql).collect();
        assert_eq!(
            sql,
            vec![
                "DROP TABLE IF EXISTS `wp_9_options`;",
                "DROP TABLE IF EXISTS `wp_7_posts`;"
            ]
        );
    }

    #[test]
    fn test_renamed_name_shape() {
        let name = renamed_table_name("wp_9_options", &layout());
        assert!(name.starts_with("wp_label_"));
        assert!(name.len() <= MAX_IDENTIFIER_LEN);
        let digest = &name["wp_label_".len()..];
        assert_eq!(digest.len(), mso_hash::MAX_DIGEST_HEX);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(name, renamed_table_name("wp_9_options", &layout()));
        assert_ne!(name, renamed_table_name("wp_9_posts", &layout()));
    }

    #[test]
    fn test_long_label_shrinks_digest() {
        let long = OrphanLayout::new("/srv/uploads", &[""], "A".repeat(40), "wp_");
        let name = renamed_table_name("wp_9_options", &long);
        assert!(name.len() <= MAX_IDENTIFIER_LEN);
        assert_eq!(name.len(), MAX_IDENTIFIER_LEN);
    }

    #[test]
    fn test_renamed_never_tenant_scoped() {
        let name = renamed_table_name("wp_9_options", &layout());
        assert!(tenant_id_from_table_name(&name, "wp_").is_none());
        let pattern = TablePattern::TenantScoped {
            prefix: "wp_".into(),
        };
        assert!(!pattern.matches(&name));
    }

    #[test]
    fn test_rename_statement_sql() {
        let statements = build_rename(&["wp_9_options".to_string()], &layout());
        let sql = statements[0].sql();
        assert!(sql.starts_with("RENAME TABLE `wp_9_options` TO `wp_label_"));
        assert!(sql.ends_with("`;"));
    }
}
