//! Bounded, optionally dry-run statement execution

use crate::OpsCtx;
use mso_errors::UserFacingError;
use mso_events::{AppEvent, EventEmitter, TableEvent};
use mso_types::{OperationTally, RunOptions, Statement};

/// Apply the statements selected by `options.limit`.
///
/// Dry run sends nothing and counts every selected statement as skipped.
/// A failing statement is counted and the batch moves on.
pub async fn execute(ctx: &OpsCtx, statements: &[Statement], options: RunOptions) -> OperationTally {
    let mut tally = OperationTally::default();

    if !options.is_valid_limit() {
        ctx.emit_debug(format!(
            "limit {} is negative, nothing to do",
            options.limit
        ));
        return tally;
    }

    let selected = options.select(statements);
    if selected.len() < statements.len() {
        ctx.emit(AppEvent::Table(TableEvent::LimitApplied {
            selected: selected.len(),
            total: statements.len(),
        }));
    }

    for statement in selected {
        let sql = statement.sql();

        if options.dry_run {
            tally.skipped += 1;
            ctx.emit(AppEvent::Table(TableEvent::StatementSkipped { sql }));
            continue;
        }

        match ctx.db.execute(statement).await {
            // RENAME reports nothing useful besides "no error"
            Ok(accepted) if accepted || statement.is_rename() => {
                tally.changed += 1;
                ctx.emit(AppEvent::Table(TableEvent::StatementApplied { sql }));
            }
            Ok(_) => {
                tally.failed += 1;
                ctx.emit(AppEvent::Table(TableEvent::StatementFailed {
                    sql,
                    error: "server did not accept the statement".to_string(),
                }));
            }
            Err(e) => {
                tally.failed += 1;
                ctx.emit(AppEvent::Table(TableEvent::StatementFailed {
                    sql,
                    error: e.user_message().into_owned(),
                }));
            }
        }
    }

    ctx.emit(AppEvent::Table(TableEvent::BatchCompleted { tally }));
    tally
}
