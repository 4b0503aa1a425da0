//! Integration tests for the mso CLI

use std::process::Command;

fn mso() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mso"));
    for var in [
        "MSO_OUTPUT",
        "MSO_COLOR",
        "MSO_DATABASE_URL",
        "MSO_DATABASE_SCHEMA",
        "MSO_TABLE_PREFIX",
        "MSO_UPLOADS_DIR",
        "MSO_LABEL",
        "MSO_DENY_MARKER",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_version() {
    let output = mso().arg("--version").output().expect("Failed to execute mso");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mso"));
}

#[test]
fn test_cli_help() {
    let output = mso().arg("--help").output().expect("Failed to execute mso");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Find and clean up orphaned multisite tables and upload folders"));
    assert!(stdout.contains("list-tables"));
    assert!(stdout.contains("do-drop-tables"));
    assert!(stdout.contains("do-move-folders"));
}

#[test]
fn test_cli_invalid_command() {
    let output = mso()
        .arg("invalid-command")
        .output()
        .expect("Failed to execute mso");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_missing_database_url_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let uploads = temp.path().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[paths]\nlogs_dir = \"{}\"\n",
            temp.path().join("logs").display()
        ),
    )
    .unwrap();

    let output = mso()
        .arg("--config")
        .arg(&config)
        .arg("--uploads-dir")
        .arg(&uploads)
        .arg("list-tables")
        .output()
        .expect("Failed to execute mso");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("database.url"), "stderr: {stderr}");
}

#[test]
fn test_invalid_prefix_is_rejected_before_connecting() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = mso()
        .arg("--config")
        .arg(&config)
        .args(["--prefix", "wp-", "--database-url", "mysql://u:p@127.0.0.1:1/none"])
        .arg("show-label")
        .output()
        .expect("Failed to execute mso");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("database.table_prefix"), "stderr: {stderr}");
}
