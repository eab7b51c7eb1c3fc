use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ecosphere-signup")]
#[command(about = "EcoSphere role-based signup flow", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drive the full signup flow from an answers file and submit it.
    /// Exits with 2 when the account was created but sign-in is still required.
    Run {
        /// JSON answers file
        #[arg(short, long)]
        answers: PathBuf,
    },
    /// Print the step order and fields for a role
    Steps {
        /// customer, organizer or shop
        #[arg(short, long)]
        role: String,
    },
    /// Validate an answers file without submitting
    Validate {
        /// JSON answers file
        #[arg(short, long)]
        answers: PathBuf,
    },
}
