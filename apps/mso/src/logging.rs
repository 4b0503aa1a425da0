//! Tracing setup and structured logging of events

use mso_events::AppEvent;
use std::path::Path;
use tracing::{debug, error, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "info,mso=debug,mso_ops=debug,mso_state=debug";
const DEFAULT_FILTER: &str = "warn,mso=warn,mso_ops=warn";

/// Initialize tracing/logging
///
/// JSON mode keeps stderr silent. `--debug` (or `RUST_LOG`) writes JSON
/// records to a timestamped file under `logs_dir`.
pub fn init_tracing(json_mode: bool, debug_enabled_flag: bool, logs_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        match open_log_file(logs_dir) {
            Ok((file, path)) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER)),
                    )
                    .init();
                if !json_mode {
                    eprintln!("Debug logging enabled: {}", path.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // keep output parseable
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            )
            .init();
    }
}

fn open_log_file(logs_dir: &Path) -> std::io::Result<(std::fs::File, std::path::PathBuf)> {
    std::fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(format!(
        "mso-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));
    let file = std::fs::File::create(&path)?;
    Ok((file, path))
}

/// Log an `AppEvent` at its own level with the payload as a JSON field
pub fn log_event_with_tracing(event: &AppEvent) {
    let domain = event.log_target();
    let payload = serde_json::to_string(event).unwrap_or_else(|e| format!("<unserializable: {e}>"));

    match event.log_level() {
        Level::ERROR => error!(target: "mso::events", domain, %payload, "event"),
        Level::WARN => warn!(target: "mso::events", domain, %payload, "event"),
        Level::INFO => info!(target: "mso::events", domain, %payload, "event"),
        Level::DEBUG => debug!(target: "mso::events", domain, %payload, "event"),
        Level::TRACE => trace!(target: "mso::events", domain, %payload, "event"),
    }
}
