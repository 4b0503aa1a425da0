//! mso - find and clean up orphaned multisite tables and upload folders
//!
//! The CLI wires configuration, the database connection and the uploads
//! layout together, then hands each command to the ops crate.

mod cli;
mod confirm;
mod display;
mod error;
mod events;
mod logging;
mod setup;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use crate::setup::SystemSetup;
use clap::Parser;
use mso_config::Config;
use mso_events::EventReceiver;
use mso_ops::{OperationResult, OpsCtx};
use mso_types::{ColorChoice, ItemKind, OutputFormat, Statement};
use std::process;
use tokio::select;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // 1. File config (or defaults)
    let mut config = Config::load_or_default(&cli.global.config).await?;

    // 2. Environment
    config.merge_env()?;

    // 3. CLI flags
    apply_cli_config(&mut config, &cli.global);
    config.validate()?;

    let json_mode = cli.global.json || config.general.default_output == OutputFormat::Json;
    logging::init_tracing(json_mode, cli.global.debug, &config.logs_dir());
    info!("Starting mso v{}", env!("CARGO_PKG_VERSION"));

    let setup = SystemSetup::initialize(&config).await?;
    let outcome = run_with_setup(&cli, &config, &setup, json_mode).await;
    setup.shutdown().await;
    outcome
}

async fn run_with_setup(
    cli: &Cli,
    config: &Config,
    setup: &SystemSetup,
    json_mode: bool,
) -> Result<(), CliError> {
    let (event_sender, event_receiver) = mso_events::channel();
    let ops_ctx = setup.ops_context(event_sender)?;

    mso_ops::ensure_multisite(&ops_ctx).await?;

    if let Some(run) = cli.command.run_args() {
        confirm::confirm_destructive(cli.command.warning(), run.yes)?;
    }

    let color = cli.global.color.unwrap_or(config.general.color);
    let renderer = OutputRenderer::new(json_mode, color);
    let colors_enabled = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug, json_mode);

    let result =
        execute_command_with_events(&cli.command, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;

    if result.is_success() {
        info!("Command completed successfully");
    } else {
        warn!("Command completed with failures");
    }
    Ok(())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: &Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ops_ctx));

    loop {
        select! {
            result = &mut command_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(command: &Commands, ctx: OpsCtx) -> Result<OperationResult, CliError> {
    let result = match command {
        Commands::ShowLabel => OperationResult::Label(mso_ops::show_label(&ctx)),
        Commands::ShowSourceDirs => OperationResult::Paths(mso_ops::show_source_dirs(&ctx)),
        Commands::ShowTargetDir => OperationResult::Path(mso_ops::show_target_dir(&ctx)),
        Commands::ListTables => OperationResult::Tables(mso_ops::list_orphan_tables(&ctx).await?),
        Commands::ListDropTables => {
            OperationResult::Statements(sql_of(&mso_ops::planned_drops(&ctx).await?))
        }
        Commands::ListDropRenamedTables => {
            OperationResult::Statements(sql_of(&mso_ops::planned_renamed_drops(&ctx).await?))
        }
        Commands::ListRenameTables => {
            OperationResult::Statements(sql_of(&mso_ops::planned_renames(&ctx).await?))
        }
        Commands::ListAlreadyRenamedTables => {
            OperationResult::Tables(mso_ops::list_renamed_tables(&ctx).await?)
        }
        Commands::ListFolders => {
            OperationResult::Folders(mso_ops::list_orphan_folders(&ctx).await?)
        }
        Commands::ListMovedFolders => {
            OperationResult::Folders(mso_ops::list_moved_folders(&ctx).await)
        }
        Commands::DoRenameTables(run) => OperationResult::Tally {
            kind: ItemKind::Tables,
            tally: mso_ops::rename_orphan_tables(&ctx, run.options()).await?,
        },
        Commands::DoDropTables(run) => OperationResult::Tally {
            kind: ItemKind::Tables,
            tally: mso_ops::drop_orphan_tables(&ctx, run.options()).await?,
        },
        Commands::DoDropRenamedTables(run) => OperationResult::Tally {
            kind: ItemKind::Tables,
            tally: mso_ops::drop_renamed_tables(&ctx, run.options()).await?,
        },
        Commands::DoMoveFolders(run) => OperationResult::Tally {
            kind: ItemKind::Folders,
            tally: mso_ops::move_orphan_folders(&ctx, run.options()).await?,
        },
    };

    Ok(result)
}

fn sql_of(statements: &[Statement]) -> Vec<String> {
    statements.iter().map(Statement::sql).collect()
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(url) = &global.database_url {
        config.database.url = Some(url.clone());
    }
    if let Some(prefix) = &global.prefix {
        config.database.table_prefix.clone_from(prefix);
    }
    if let Some(uploads_dir) = &global.uploads_dir {
        config.paths.uploads_dir = Some(uploads_dir.clone());
    }
}
