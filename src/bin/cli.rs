//! Mission Monitor uploader CLI
//!
//! Uploads local mission logs and KPI tables to the admin API.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mission_uploader::{
    api::{HttpAdminClient, REFRESH_TARGETS},
    error::Result,
    models::Config,
    pipeline,
};

/// Mission Monitor uploader
#[derive(Parser, Debug)]
#[command(
    name = "mission-uploader",
    version,
    about = "Uploads Mission Monitor data to the admin API"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Exit immediately on failure instead of waiting for Enter
    #[arg(long)]
    no_pause: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload new mission logs, then refresh caches
    Mission,

    /// Upload KPI weight tables, then refresh caches
    Kpi,

    /// Refresh server-side caches only
    Refresh,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Block until the operator presses Enter.
fn pause() {
    print!("Press enter to exit...");
    let _ = io::stdout().flush();
    let _ = io::stdin().lock().read_line(&mut String::new());
}

async fn run(cli: &Cli) -> Result<()> {
    log::info!("Loading {}...", cli.config.display());
    let config = Config::load(&cli.config)?;
    config.validate()?;
    log::info!("admin endpoint: {}", config.admin_endpoint);

    let api = HttpAdminClient::from_config(&config)?;

    match cli.command {
        Command::Mission => {
            let log_dir = config.log_dir()?;
            let summary = pipeline::run_mission_upload(&api, log_dir).await?;
            log::info!("Uploaded {} missions", summary.uploaded);
        }

        Command::Kpi => {
            pipeline::run_kpi_upload(&api, &config.kpi_data_path, &config.entity_list_path).await?;
        }

        Command::Refresh => {
            pipeline::refresh_all(&api, &REFRESH_TARGETS).await?;
        }
    }

    log::info!("Rock and stone!");
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e.report());
            if !cli.no_pause {
                pause();
            }
            ExitCode::FAILURE
        }
    }
}
