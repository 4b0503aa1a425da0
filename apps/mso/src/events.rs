//! Event handling and user feedback
//!
//! Progress goes to stderr so stdout carries only the command result.

use crate::logging::log_event_with_tracing;
use console::Style;
use mso_events::{AppEvent, FolderEvent, GeneralEvent, TableEvent};

/// Renders events as they arrive
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    json_mode: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool, json_mode: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            json_mode,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);
        if self.json_mode {
            return;
        }

        match event {
            AppEvent::General(general) => self.handle_general(general),
            AppEvent::Table(table) => self.handle_table(table),
            AppEvent::Folder(folder) => self.handle_folder(folder),
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => match context {
                Some(context) => self.show_warning(&format!("{message}: {context}")),
                None => self.show_warning(&message),
            },
            GeneralEvent::DebugLog { message } => self.show_debug(&message),
            GeneralEvent::OperationStarted { operation } => {
                self.show_debug(&format!("{operation} started"));
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                self.show_debug(&format!(
                    "{operation} {}",
                    if success { "completed" } else { "completed with failures" }
                ));
            }
        }
    }

    fn handle_table(&self, event: TableEvent) {
        match event {
            TableEvent::Classified {
                candidates,
                orphans,
                tenants,
            } => self.show_debug(&format!(
                "{candidates} site tables, {orphans} orphaned, {tenants} registered sites"
            )),
            TableEvent::LimitApplied { selected, total } => {
                self.show_status(&format!("Limiting to {selected} of {total} tables"));
            }
            TableEvent::StatementApplied { sql } => self.show_success(&sql),
            TableEvent::StatementSkipped { sql } => {
                self.show_status(&format!("Dry run, not executed: {sql}"));
            }
            TableEvent::StatementFailed { sql, error } => {
                self.show_warning(&format!("Failed: {sql}: {error}"));
            }
            TableEvent::BatchCompleted { .. } => {}
        }
    }

    fn handle_folder(&self, event: FolderEvent) {
        match event {
            FolderEvent::SourceDirMissing { path } => {
                self.show_debug(&format!("Source directory not found: {}", path.display()));
            }
            FolderEvent::Classified { scanned, orphans } => {
                self.show_debug(&format!("{scanned} site folders, {orphans} orphaned"));
            }
            FolderEvent::QuarantinePrepared { path } => {
                self.show_status(&format!("Quarantine directory ready: {}", path.display()));
            }
            FolderEvent::AccessProtected { path } => {
                self.show_status(&format!("Wrote {}", path.display()));
            }
            FolderEvent::Moved { from, to } => {
                self.show_success(&format!("Moved {} → {}", from.display(), to.display()));
            }
            FolderEvent::MoveSkipped { from, to } => self.show_status(&format!(
                "Dry run, not moved: {} → {}",
                from.display(),
                to.display()
            )),
            FolderEvent::MoveFailed { from, to, error } => self.show_warning(&format!(
                "Failed to move {} → {}: {error}",
                from.display(),
                to.display()
            )),
            FolderEvent::MoveRejected { path, reason } => {
                self.show_warning(&format!("Skipping {}: {reason}", path.display()));
            }
            FolderEvent::BatchCompleted { .. } => {}
        }
    }

    fn show_status(&self, message: &str) {
        eprintln!("{message}");
    }

    fn show_success(&self, message: &str) {
        eprintln!("{}", self.paint(Style::new().green(), message));
    }

    fn show_warning(&self, message: &str) {
        eprintln!(
            "{}",
            self.paint(Style::new().yellow(), &format!("Warning: {message}"))
        );
    }

    fn show_debug(&self, message: &str) {
        if self.debug_enabled {
            eprintln!("{}", self.paint(Style::new().dim(), message));
        }
    }

    fn paint(&self, style: Style, message: &str) -> String {
        if self.colors_enabled {
            style.force_styling(true).apply_to(message).to_string()
        } else {
            message.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mso_types::OperationTally;
    use std::path::PathBuf;

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let handler = EventHandler::new(false, false, false);
        assert_eq!(handler.paint(Style::new().red(), "boom"), "boom");
    }

    #[test]
    fn test_colored_output_is_styled() {
        let handler = EventHandler::new(true, false, false);
        let painted = handler.paint(Style::new().red(), "boom");
        assert!(painted.contains("boom"));
        assert_ne!(painted, "boom");
    }

    #[test]
    fn test_every_event_is_handled_in_json_mode() {
        let mut handler = EventHandler::new(false, true, true);
        handler.handle_event(AppEvent::General(GeneralEvent::warning_with_context("w", "ctx")));
        handler.handle_event(AppEvent::Table(TableEvent::BatchCompleted {
            tally: OperationTally::default(),
        }));
        handler.handle_event(AppEvent::Folder(FolderEvent::MoveRejected {
            path: PathBuf::from("/tmp/x"),
            reason: "outside".to_string(),
        }));
    }
}
