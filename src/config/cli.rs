use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "wiki-deaths-notifier")]
#[command(about = "Watches a Wikipedia deaths list and notifies about new names")]
pub struct CliArgs {
    /// Optional TOML file overriding the built-in settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print notifications instead of sending email
    #[arg(long)]
    pub dry_run: bool,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
