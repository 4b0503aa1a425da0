//! Integration tests for the quarantine guard

#[cfg(test)]
mod tests {
    use mso_errors::{Error, GuardError};
    use mso_guard::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        uploads: PathBuf,
        quarantine: PathBuf,
        guard: QuarantineGuard,
    }

    async fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let uploads = temp.path().join("uploads");
        std::fs::create_dir_all(uploads.join("sites").join("5")).unwrap();
        std::fs::create_dir_all(temp.path().join("uploads2").join("5")).unwrap();
        let quarantine = uploads.join("Orphans");
        let guard = QuarantineGuard::new(&uploads, &quarantine).await.unwrap();
        Fixture {
            _temp: temp,
            uploads,
            quarantine,
            guard,
        }
    }

    #[tokio::test]
    async fn test_placement_mirrors_relative_path() {
        let fx = fixture().await;
        let placement = fx.guard.place(&fx.uploads.join("sites/5")).await.unwrap();
        assert_eq!(placement.relative, PathBuf::from("sites/5"));
        assert_eq!(
            placement.destination,
            fx.guard.quarantine_root().join("sites").join("5")
        );
        fx.guard
            .check_destination(&placement.destination)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_uploads_root_rejected() {
        let fx = fixture().await;
        let err = fx.guard.place(&fx.uploads).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::IsUploadsRoot { .. })
        ));
    }

    #[tokio::test]
    async fn test_sibling_with_shared_prefix_rejected() {
        let fx = fixture().await;
        let sibling = fx.uploads.parent().unwrap().join("uploads2").join("5");
        let err = fx.guard.place(&sibling).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::OutsideUploadsRoot { .. })
        ));
    }

    #[tokio::test]
    async fn test_dot_dot_escape_rejected() {
        let fx = fixture().await;
        let sneaky = fx.uploads.join("sites").join("..").join("..").join("uploads2");
        assert!(fx.guard.place(&sneaky).await.is_err());
    }

    #[tokio::test]
    async fn test_folder_inside_quarantine_rejected() {
        let fx = fixture().await;
        let parked = fx.quarantine.join("sites").join("7");
        std::fs::create_dir_all(&parked).unwrap();
        let err = fx.guard.place(&parked).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::InsideQuarantine { .. })
        ));
    }

    #[tokio::test]
    async fn test_existing_destination_rejected() {
        let fx = fixture().await;
        let taken = fx.quarantine.join("sites").join("5");
        std::fs::create_dir_all(&taken).unwrap();
        let placement = fx.guard.place(&fx.uploads.join("sites/5")).await.unwrap();
        let err = fx
            .guard
            .check_destination(&placement.destination)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::DestinationExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_destination_outside_quarantine_rejected() {
        let fx = fixture().await;
        let err = fx
            .guard
            .check_destination(&fx.uploads.join("elsewhere"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::DestinationEscapes { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_uploads_rejected() {
        let fx = fixture().await;
        let outside = fx.uploads.parent().unwrap().join("uploads2").join("5");
        let link = fx.uploads.join("sites").join("8");
        std::os::unix::fs::symlink(&outside, &link).unwrap();
        let err = fx.guard.place(&link).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::OutsideUploadsRoot { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_folder_unresolvable() {
        let fx = fixture().await;
        let err = fx
            .guard
            .place(&fx.uploads.join("sites").join("404"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Guard(GuardError::Unresolvable { .. })
        ));
    }
}
