//! Directory preparation

use mso_errors::{Error, StorageError};
use std::path::Path;

/// Make sure `path` exists as a directory the process can write to.
///
/// Creates it recursively. A read-only directory gets mode `0755`.
///
/// # Errors
///
/// Returns [`StorageError::DirectoryUnavailable`] if the directory cannot be
/// created or made writable.
pub async fn ensure_dir_writable(path: &Path) -> Result<(), Error> {
    let unavailable = |message: String| -> Error {
        StorageError::DirectoryUnavailable {
            path: path.display().to_string(),
            message,
        }
        .into()
    };

    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }

    let mut permissions = metadata.permissions();
    if permissions.readonly() {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(0o755);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(false);

        tokio::fs::set_permissions(path, permissions)
            .await
            .map_err(|e| unavailable(format!("cannot make writable: {e}")))?;
        tracing::debug!(path = %path.display(), "made directory writable");
    }

    Ok(())
}
