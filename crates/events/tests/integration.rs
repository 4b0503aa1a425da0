//! Integration tests for events

#[cfg(test)]
mod tests {
    use mso_events::*;
    use mso_types::OperationTally;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_event_emitter_helpers() {
        let (tx, mut rx) = channel();

        tx.emit_operation_started("drop tables");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            AppEvent::General(GeneralEvent::OperationStarted { ref operation }) if operation == "drop tables"
        ));

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning_with_context("ignored", "nobody listens");
    }

    #[test]
    fn test_log_levels() {
        let failed = AppEvent::Table(TableEvent::StatementFailed {
            sql: "DROP TABLE IF EXISTS `wp_9_options`;".into(),
            error: "locked".into(),
        });
        assert_eq!(failed.log_level(), tracing::Level::WARN);
        assert_eq!(failed.log_target(), "mso::events::table");

        let moved = AppEvent::Folder(FolderEvent::Moved {
            from: PathBuf::from("/u/sites/5"),
            to: PathBuf::from("/u/label/sites/5"),
        });
        assert_eq!(moved.log_level(), tracing::Level::INFO);

        let missing = AppEvent::Folder(FolderEvent::SourceDirMissing {
            path: PathBuf::from("/u/sites"),
        });
        assert_eq!(missing.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = AppEvent::Table(TableEvent::BatchCompleted {
            tally: OperationTally {
                changed: 2,
                failed: 1,
                skipped: 0,
            },
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "table");
        assert_eq!(json["event"]["type"], "batch_completed");
        assert_eq!(json["event"]["tally"]["changed"], 2);
    }
}
