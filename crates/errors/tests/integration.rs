//! Integration tests for error types

#[cfg(test)]
mod tests {
    use mso_errors::*;

    #[test]
    fn test_error_conversion() {
        let guard_err = GuardError::IsUploadsRoot {
            path: "/srv/uploads".into(),
        };
        let err: Error = guard_err.into();
        assert!(matches!(err, Error::Guard(_)));
        assert_eq!(err.user_code(), Some("guard.is_uploads_root"));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::DirectoryUnavailable {
            path: "/srv/uploads/Orphans".into(),
            message: "read-only file system".into(),
        };
        assert_eq!(
            err.to_string(),
            "directory could not be prepared: /srv/uploads/Orphans: read-only file system"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = StateError::TableNotFound {
            table: "wp_9_options".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_rename_failure_names_both_paths() {
        let io_err = std::io::Error::other("cross-device link");
        let err: Error = StorageError::rename_failed(
            &io_err,
            std::path::Path::new("/srv/uploads/sites/7"),
            std::path::Path::new("/srv/uploads/Orphans/sites/7"),
        )
        .into();
        let message = err.user_message();
        assert!(message.contains("/srv/uploads/sites/7"));
        assert!(message.contains("/srv/uploads/Orphans/sites/7"));
        assert!(message.contains("cross-device link"));
        assert_eq!(err.user_code(), Some("storage.atomic_rename_failed"));
    }

    #[test]
    fn test_cancelled_has_hint() {
        let err = Error::Cancelled;
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_multisite_message() {
        let err: Error = StateError::NotMultisite {
            schema: "wordpress".into(),
            table: "wp_blogs".into(),
        }
        .into();
        assert!(err.user_message().contains("wp_blogs"));
        assert_eq!(err.user_code(), Some("state.not_multisite"));
    }
}
