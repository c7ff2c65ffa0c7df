use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "survey-kiosk")]
#[command(about = "Terminal kiosk for the parent and student questionnaires")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to write responses to (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Question catalogue in TOML (overrides the config file)
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Disable colors in prompts
    #[arg(long)]
    pub plain: bool,

    /// Keep responses in memory only; nothing is written to disk
    #[arg(long)]
    pub dry_run: bool,
}
