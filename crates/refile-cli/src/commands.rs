use clap::{Parser, Subcommand};
use std::path::PathBuf;

use refile_core::Strategy;

#[derive(Debug, Parser)]
#[command(name = "refile")]
#[command(about = "Batch-rename ticket folders into a rebuilt output tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the input tree and run the full rename-and-copy batch
    Run {
        /// Input directory holding the ticket folders
        #[arg(long)]
        input: Option<PathBuf>,
        /// Renaming strategy: "flatten" or "tree"
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Proceed without asking when compressed files are found
        #[arg(long)]
        yes: bool,
    },
    /// Print configuration values
    PrintConfig,
    /// Open the directory holding the rename logs
    OpenLogs,
}
