//! Orphan upload folders and the quarantine

use crate::OpsCtx;
use mso_errors::{Error, OpsError, StorageError, UserFacingError};
use mso_events::{AppEvent, EventEmitter, FolderEvent};
use mso_guard::{ensure_dir_writable, QuarantineGuard};
use mso_types::{OperationTally, RunOptions, TenantId};
use std::path::{Path, PathBuf};

/// Numeric-named folders under the source directories that belong to no
/// registered tenant, sorted by path.
///
/// Symlinks are not followed. Missing source directories are skipped.
///
/// # Errors
///
/// Returns an error if the tenant registry cannot be read.
pub async fn list_orphan_folders(ctx: &OpsCtx) -> Result<Vec<PathBuf>, Error> {
    let tenants = ctx.tenants.tenant_set().await?;

    let mut scanned = 0;
    let mut orphans = Vec::new();
    for dir in &ctx.layout.source_dirs {
        for (path, id) in numeric_children(ctx, dir).await {
            scanned += 1;
            if !tenants.contains(id) {
                orphans.push(path);
            }
        }
    }
    orphans.sort();
    orphans.dedup();

    ctx.emit(AppEvent::Folder(FolderEvent::Classified {
        scanned,
        orphans: orphans.len(),
    }));

    Ok(orphans)
}

/// Folders already moved into the quarantine, sorted by path
///
/// Empty when the quarantine root does not exist yet.
pub async fn list_moved_folders(ctx: &OpsCtx) -> Vec<PathBuf> {
    let mut moved = Vec::new();
    for mirror in ctx.layout.quarantine_mirrors() {
        moved.extend(
            numeric_children(ctx, &mirror)
                .await
                .into_iter()
                .map(|(path, _)| path),
        );
    }
    moved.sort();
    moved.dedup();
    moved
}

/// Relocate folders into the quarantine root, keeping their path relative
/// to the uploads root.
///
/// Folders failing a path check are counted as failed and reported; the
/// batch continues.
///
/// # Errors
///
/// Returns an error if the quarantine root or a destination parent cannot
/// be prepared, or the uploads root cannot be resolved.
pub async fn move_folders(
    ctx: &OpsCtx,
    folders: &[PathBuf],
    options: RunOptions,
) -> Result<OperationTally, Error> {
    let mut tally = OperationTally::default();

    if !options.is_valid_limit() {
        ctx.emit_debug(format!(
            "limit {} is negative, nothing to do",
            options.limit
        ));
        return Ok(tally);
    }

    let selected = options.select(folders);
    if selected.is_empty() {
        ctx.emit(AppEvent::Folder(FolderEvent::BatchCompleted { tally }));
        return Ok(tally);
    }

    if !options.dry_run {
        prepare_quarantine(ctx).await?;
    }

    let guard = QuarantineGuard::new(&ctx.layout.uploads_root, &ctx.layout.quarantine_root).await?;

    for folder in selected {
        let placement = match guard.place(folder).await {
            Ok(placement) => placement,
            Err(e) => {
                tally.failed += 1;
                reject(ctx, folder, &e);
                continue;
            }
        };

        if !options.dry_run {
            if let Some(parent) = placement.destination.parent() {
                ensure_dir_writable(parent).await?;
            }
        }

        if let Err(e) = guard.check_destination(&placement.destination).await {
            tally.failed += 1;
            reject(ctx, folder, &e);
            continue;
        }

        if options.dry_run {
            tally.skipped += 1;
            ctx.emit(AppEvent::Folder(FolderEvent::MoveSkipped {
                from: folder.clone(),
                to: placement.destination,
            }));
            continue;
        }

        match tokio::fs::rename(&placement.source, &placement.destination).await {
            Ok(()) => {
                tally.changed += 1;
                ctx.emit(AppEvent::Folder(FolderEvent::Moved {
                    from: folder.clone(),
                    to: placement.destination,
                }));
            }
            Err(e) => {
                tally.failed += 1;
                let error = StorageError::rename_failed(&e, &placement.source, &placement.destination);
                ctx.emit(AppEvent::Folder(FolderEvent::MoveFailed {
                    from: folder.clone(),
                    to: placement.destination,
                    error: error.user_message().into_owned(),
                }));
            }
        }
    }

    ctx.emit(AppEvent::Folder(FolderEvent::BatchCompleted { tally }));
    Ok(tally)
}

/// Move every orphan folder
///
/// # Errors
///
/// See [`list_orphan_folders`] and [`move_folders`].
pub async fn move_orphan_folders(
    ctx: &OpsCtx,
    options: RunOptions,
) -> Result<OperationTally, Error> {
    ctx.emit_operation_started("move folders");
    let folders = list_orphan_folders(ctx).await?;
    let tally = move_folders(ctx, &folders, options).await?;
    ctx.emit_operation_completed("move folders", tally.failed == 0);
    Ok(tally)
}

async fn prepare_quarantine(ctx: &OpsCtx) -> Result<(), Error> {
    let root = &ctx.layout.quarantine_root;
    ensure_dir_writable(root).await.map_err(|e| OpsError::QuarantineUnavailable {
        path: root.display().to_string(),
        message: e.user_message().into_owned(),
    })?;
    ctx.emit(AppEvent::Folder(FolderEvent::QuarantinePrepared { path: root.clone() }));

    if let Some(marker) = ctx.deny.protect(root).await? {
        ctx.emit(AppEvent::Folder(FolderEvent::AccessProtected { path: marker }));
    }
    Ok(())
}

fn reject(ctx: &OpsCtx, folder: &Path, error: &Error) {
    ctx.emit(AppEvent::Folder(FolderEvent::MoveRejected {
        path: folder.to_path_buf(),
        reason: error.user_message().into_owned(),
    }));
}

/// Immediate children of `dir` that are real directories with a tenant-id name
async fn numeric_children(ctx: &OpsCtx, dir: &Path) -> Vec<(PathBuf, TenantId)> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            ctx.emit(AppEvent::Folder(FolderEvent::SourceDirMissing {
                path: dir.to_path_buf(),
            }));
            return Vec::new();
        }
        Err(e) => {
            ctx.emit_warning_with_context(
                format!("cannot read {}", dir.display()),
                e.to_string(),
            );
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                ctx.emit_warning_with_context(
                    format!("stopped reading {}", dir.display()),
                    e.to_string(),
                );
                break;
            }
        };

        let name = entry.file_name();
        let Some(id) = name.to_str().and_then(TenantId::parse_segment) else {
            continue;
        };
        // DirEntry::file_type does not traverse symlinks
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        if is_dir {
            found.push((entry.path(), id));
        }
    }
    found
}
