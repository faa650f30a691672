mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use j2me_shell::settings::ScreenScaling;

// ============================================================================
// CLI Types
// ============================================================================

/// J2ME Shell - install, persist and run J2ME application archives
#[derive(Parser, Debug)]
#[command(version = j2me_shell::build_info::VERSION, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = j2me_shell::config::DEFAULT_CONFIG_FILE, global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install a .jar or .jad archive into the library
    Install {
        /// Archive file to install
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List installed archives
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Remove an installed archive and its saved state
    Remove {
        /// Archive name, e.g. snake.jar
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Run an installed archive headlessly
    Run {
        /// Archive name, e.g. snake.jar
        #[arg(value_name = "NAME")]
        name: String,

        /// Stop after this many frames (runs until Ctrl-C if omitted)
        #[arg(long)]
        frames: Option<u64>,
    },

    /// Show storage usage
    Storage {
        /// Remove every archive and saved state, and reset settings
        #[arg(long)]
        clear: bool,
    },

    /// Show or update settings and theme
    Settings {
        /// Select a theme by id
        #[arg(long)]
        theme: Option<String>,

        /// Screen scaling mode [fit, stretch, pixel-perfect]
        #[arg(long)]
        scaling: Option<ScreenScaling>,

        /// Phone body colour, e.g. "#333333"
        #[arg(long)]
        phone_color: Option<String>,

        /// Minutes between automatic state saves (0 disables)
        #[arg(long)]
        auto_save: Option<u32>,

        /// Volume between 0.0 and 1.0
        #[arg(long)]
        volume: Option<f32>,

        /// Enable or disable vibration
        #[arg(long)]
        vibration: Option<bool>,

        /// Enable or disable keyboard input
        #[arg(long)]
        keyboard: Option<bool>,

        /// Restore default settings
        #[arg(long)]
        reset: bool,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_str();

    match cli.command {
        Commands::Install { file } => commands::library::install(config, &file).await,
        Commands::List { format } => commands::library::list(config, &format).await,
        Commands::Remove { name } => commands::library::remove(config, &name).await,
        Commands::Run { name, frames } => commands::run::run(config, &name, frames).await,
        Commands::Storage { clear } => commands::storage::run(config, clear).await,
        Commands::Settings {
            theme,
            scaling,
            phone_color,
            auto_save,
            volume,
            vibration,
            keyboard,
            reset,
        } => {
            let update = commands::settings::SettingsUpdate {
                theme,
                scaling,
                phone_color,
                auto_save,
                volume,
                vibration,
                keyboard,
                reset,
            };
            commands::settings::run(config, update).await
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
