use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Taskdock: groups the windows of a desktop session into one button per
/// application.
#[derive(Parser, Debug)]
#[command(name = "taskdock", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the dock (default).
    Run,
    /// Print the application each window identity resolves to.
    Resolve {
        #[arg(required = true)]
        identities: Vec<String>,
    },
    /// Feed a JSON script of window events through the dock and print the
    /// resulting groups.
    Replay { file: PathBuf },
}

pub fn parse() -> Args {
    Args::parse()
}
