//! Containment checks between the uploads root and the quarantine root

use mso_errors::{Error, GuardError};
use std::path::{Component, Path, PathBuf};

/// Canonical form of an existing path
///
/// # Errors
///
/// Returns [`GuardError::Unresolvable`] if the path does not exist or cannot
/// be resolved.
pub async fn canonical(path: &Path) -> Result<PathBuf, Error> {
    tokio::fs::canonicalize(path).await.map_err(|e| {
        GuardError::Unresolvable {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Resolve a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are appended; those must all be plain names.
///
/// # Errors
///
/// Returns [`GuardError::Unresolvable`] if no ancestor exists or the
/// remainder contains `..`, `.` or a root.
pub async fn resolve_lenient(path: &Path) -> Result<PathBuf, Error> {
    let mut existing = path;
    let mut rest: Vec<&std::ffi::OsStr> = Vec::new();

    loop {
        if let Ok(resolved) = tokio::fs::canonicalize(existing).await {
            let mut resolved = resolved;
            for name in rest.iter().rev() {
                resolved.push(name);
            }
            return Ok(resolved);
        }

        let unresolvable = |message: &str| -> Error {
            GuardError::Unresolvable {
                path: path.display().to_string(),
                message: message.to_string(),
            }
            .into()
        };

        match existing.components().next_back() {
            Some(Component::Normal(name)) => rest.push(name),
            _ => return Err(unresolvable("path has no existing ancestor")),
        }
        existing = existing
            .parent()
            .ok_or_else(|| unresolvable("path has no existing ancestor"))?;
        if existing.as_os_str().is_empty() {
            return Err(unresolvable("relative path has no existing ancestor"));
        }
    }
}

/// A folder that passed the source gates, with its planned destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Canonical source folder
    pub source: PathBuf,
    /// Source relative to the uploads root, e.g. `sites/5`
    pub relative: PathBuf,
    /// Where the folder goes inside the quarantine root
    pub destination: PathBuf,
}

/// Resolved uploads and quarantine roots
#[derive(Debug, Clone)]
pub struct QuarantineGuard {
    uploads_root: PathBuf,
    quarantine_root: PathBuf,
}

impl QuarantineGuard {
    /// Resolve both roots. The uploads root must exist; the quarantine root
    /// may not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if either root cannot be resolved.
    pub async fn new(uploads_root: &Path, quarantine_root: &Path) -> Result<Self, Error> {
        let uploads_root = canonical(uploads_root).await?;
        let quarantine_root = resolve_lenient(quarantine_root).await?;
        Ok(Self {
            uploads_root,
            quarantine_root,
        })
    }

    #[must_use]
    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    #[must_use]
    pub fn quarantine_root(&self) -> &Path {
        &self.quarantine_root
    }

    /// Check a candidate folder and compute its destination.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardError`] if the folder is the uploads root, lies
    /// outside it, or already sits inside the quarantine root.
    pub async fn place(&self, folder: &Path) -> Result<Placement, Error> {
        let source = canonical(folder).await?;

        if source == self.uploads_root {
            return Err(GuardError::IsUploadsRoot {
                path: folder.display().to_string(),
            }
            .into());
        }

        let Ok(relative) = source.strip_prefix(&self.uploads_root) else {
            return Err(GuardError::OutsideUploadsRoot {
                path: folder.display().to_string(),
                root: self.uploads_root.display().to_string(),
            }
            .into());
        };

        if source.starts_with(&self.quarantine_root) {
            return Err(GuardError::InsideQuarantine {
                path: folder.display().to_string(),
                root: self.quarantine_root.display().to_string(),
            }
            .into());
        }

        let relative = relative.to_path_buf();
        let destination = self.quarantine_root.join(&relative);
        Ok(Placement {
            source,
            relative,
            destination,
        })
    }

    /// Check that a destination resolves inside the quarantine root and is free.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::DestinationEscapes`] or
    /// [`GuardError::DestinationExists`].
    pub async fn check_destination(&self, destination: &Path) -> Result<(), Error> {
        let resolved = resolve_lenient(destination).await?;
        if resolved == self.quarantine_root || !resolved.starts_with(&self.quarantine_root) {
            return Err(GuardError::DestinationEscapes {
                destination: destination.display().to_string(),
                root: self.quarantine_root.display().to_string(),
            }
            .into());
        }

        if tokio::fs::symlink_metadata(destination).await.is_ok() {
            return Err(GuardError::DestinationExists {
                destination: destination.display().to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resolve_lenient_missing_tail() {
        let temp = TempDir::new().unwrap();
        let base = canonical(temp.path()).await.unwrap();
        let resolved = resolve_lenient(&temp.path().join("a").join("b"))
            .await
            .unwrap();
        assert_eq!(resolved, base.join("a").join("b"));
    }

    #[tokio::test]
    async fn test_resolve_lenient_rejects_parent_hops() {
        let temp = TempDir::new().unwrap();
        let sneaky = temp.path().join("missing").join("..").join("x");
        assert!(resolve_lenient(&sneaky).await.is_err());
    }
}
