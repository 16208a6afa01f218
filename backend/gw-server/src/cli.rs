use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gw-server")]
#[command(about = "Gateway service with remote update-and-restart")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Show the last restart sentinel and effective configuration
    Doctor {
        /// Print JSON without prompting
        #[arg(long)]
        non_interactive: bool,
    },
}
