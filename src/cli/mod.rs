//! Command-line interface for medguide.

mod commands;

use clap::{Parser, Subcommand};

/// medguide - drug information service
/// Searches FDA labels, summarizes them, and checks interactions
#[derive(Parser)]
#[command(name = "medguide")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Look up a drug and print its summary
    #[command(alias = "s")]
    Search {
        /// Brand or generic drug name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Check a combination of drugs for interactions
    #[command(alias = "check")]
    Interactions {
        /// Two or more drug names
        #[arg(required = true, num_args = 2..)]
        drugs: Vec<String>,
    },

    /// Delete every cached drug summary
    ClearCache,

    /// Delete expired cached drug summaries
    PurgeCache,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
