use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gallery_runner::commands;
use gallery_runner::core::command::DownloadOptions;
use gallery_runner::ui::log_view::LogFormat;

#[derive(Parser)]
#[clap(name = "gallery-runner")]
#[clap(about = "Run gallery-dl and follow its output live")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a gallery once and exit
    Download {
        /// Gallery URL, passed to gallery-dl as-is
        url: String,
        /// Target directory (default: ~/Downloads/gallery-dl-downloads)
        #[clap(short = 'D', long)]
        directory: Option<PathBuf>,
        /// Don't use the original modification time
        #[clap(long)]
        no_mtime: bool,
        /// Simulate the download, don't save files
        #[clap(long)]
        no_download: bool,
        /// Output format: text or json
        #[clap(short, long, value_enum, default_value = "text")]
        format: LogFormat,
    },
    /// Prompt for downloads interactively (the default)
    Interactive,
    /// Check that gallery-dl is installed and runnable
    Doctor,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Download {
            url,
            directory,
            no_mtime,
            no_download,
            format,
        } => {
            let options = DownloadOptions {
                suppress_mtime: no_mtime,
                simulate_only: no_download,
            };
            match commands::download::download(&url, directory, options, format) {
                // The log view has already printed the failure.
                Ok(outcome) if !outcome.is_success() => std::process::exit(1),
                other => other.map(|_| ()).map_err(|e| anyhow::anyhow!(e)),
            }
        }
        Commands::Interactive => {
            commands::interactive::run_session().map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Doctor => commands::doctor::check_environment().map_err(|e| anyhow::anyhow!(e)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
