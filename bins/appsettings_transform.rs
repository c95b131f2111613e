use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::{ConnectionStringEntry, SettingsWriter, TransformOutcome, TransformRequest};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "appsettings-transform", version, about = "Generate appsettings.json files and rewrite their connection strings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default appsettings file to the temp dir and print its path
    Generate,
    /// Set connection strings in an existing settings file
    Update {
        path: PathBuf,
        /// Entries as NAME=VALUE, applied in order
        entries: Vec<ConnectionStringEntry>,
    },
    /// Copy a source settings file (or a default one) to a destination and set connection strings there
    Publish {
        #[arg(long)]
        destination: PathBuf,
        #[arg(long)]
        source: Option<PathBuf>,
        entries: Vec<ConnectionStringEntry>,
    },
}

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
    info!(service = "appsettings-transform", event = "logger_init", "tracing subscriber initialized");
}

fn run(cli: Cli, writer: &SettingsWriter) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate => {
            let path = writer.generate_default_file().context("generating default appsettings file")?;
            println!("{}", path.display());
        }
        Command::Update { path, entries } => {
            writer
                .update_connection_strings(&path, &entries)
                .with_context(|| format!("updating {}", path.display()))?;
        }
        Command::Publish { destination, source, entries } => {
            let request = TransformRequest { source, destination, entries };
            match writer.transform_app_settings(&request)? {
                TransformOutcome::Skipped => info!(event = "publish_skipped", "nothing to publish"),
                TransformOutcome::Applied { seeded_from_default, entries } => {
                    info!(event = "published", seeded_from_default, entries, "publish complete")
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // load .env first so CONFIG_PATH and RUST_LOG take effect
    dotenv().ok();

    // config errors are reported after logging is up
    let loaded = AppConfig::load_and_validate();
    let format = loaded.as_ref().map(|c| c.logging.format).unwrap_or_default();
    init_logging(format);

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            let reason = format!("{e:#}");
            error!(service = "appsettings-transform", event = "config_invalid", error = %reason, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "appsettings-transform", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    info!(service = "appsettings-transform", event = "start", %run_id, version, "run starting");

    let writer = SettingsWriter::from_config(&cfg.transform);
    match run(cli, &writer) {
        Ok(()) => {
            info!(service = "appsettings-transform", event = "stop", %run_id, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let reason = format!("{e:#}");
            error!(service = "appsettings-transform", event = "run_failed", %run_id, error = %reason, "run failed");
            ExitCode::FAILURE
        }
    }
}
