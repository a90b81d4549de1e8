use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(short, long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply pending revisions, all of them unless a count is given
    Upgrade {
        #[arg(short = 'n', long)]
        steps: Option<u32>,
    },
    /// Revert the most recently applied revisions
    Downgrade {
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Show every revision with whether it is applied
    Status,
    /// Print the revision chain from base to head
    History,
}
