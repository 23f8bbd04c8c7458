use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Watches job-announcement pages and pushes new postings to WeChat")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every source once and notify about new announcements
    Run {
        /// Dry run - don't send notifications or save history, just show what would be sent
        #[arg(long)]
        dry_run: bool,
    },

    /// List configured sources with their last seen titles
    List,
}
