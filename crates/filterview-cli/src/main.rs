mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filterview_core::config::PreviewConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filterview", about = "Filter preview pane driver")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preview settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and preview zoom levels
    Info(commands::info::InfoArgs),
    /// Run a scripted zoom/pan session and export the visible crop
    View(commands::view::ViewArgs),
    /// List, add and import favorite filters
    Faves(commands::faves::FavesArgs),
    /// Print or save the default preview config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => PreviewConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PreviewConfig::default(),
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::View(args) => commands::view::run(args, &config),
        Commands::Faves(args) => commands::faves::run(args, &config),
        Commands::Config(args) => commands::config::run(args),
    }
}
