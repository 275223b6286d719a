use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prestashop_console::commands::{self, install::InstallFlags};

#[derive(Parser)]
#[clap(name = "prestashop")]
#[clap(about = "PrestaShop installer console")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and install PrestaShop into a directory
    Install {
        /// Target directory (created if missing)
        directory: String,
        /// Version to install: 1.6 or 1.7 (default: 1.7)
        version: Option<String>,
        /// Reuse an archive already downloaded into the directory
        #[clap(long)]
        reuse_download: bool,
        /// Do not draw a progress bar
        #[clap(long)]
        no_progress: bool,
        /// Ask for the version when none is given
        #[clap(short, long)]
        interactive: bool,
    },
    /// List the versions that can be installed
    Versions {
        /// Output format: text or json
        #[clap(short, long, default_value = "text")]
        format: String,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prestashop_console={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Install {
            directory,
            version,
            reuse_download,
            no_progress,
            interactive,
        } => commands::install::install_distribution(
            &directory,
            version.as_deref(),
            InstallFlags {
                reuse_download,
                no_progress,
                interactive,
            },
        )
        .map_err(|e| anyhow::anyhow!(e)),
        Commands::Versions { format } => {
            commands::versions::list_versions(&format).map_err(|e| anyhow::anyhow!(e))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
