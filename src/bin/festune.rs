use clap::Parser;
use std::path::PathBuf;

mod commands;

use commands::{execute_command, Commands};

/// Spotify playlist mirror and duplicate finder
#[derive(Parser)]
#[command(
    name = "festune",
    about = "Mirror Spotify playlists locally and find tracks shared between them",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Directory holding the local mirror (defaults to FESTUNE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = match festune::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    };
    let settings = match args.data_dir {
        Some(data_dir) => settings.with_data_dir(data_dir),
        None => settings,
    };

    if args.verbose {
        println!("📁 Using data directory {}", settings.data_dir.display());
    }

    if let Err(e) = execute_command(args.command, &settings).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }
}
