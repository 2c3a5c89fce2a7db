//! Command-line interface parsing for holocron.

use clap::{Parser, Subcommand};

/// Browse the Star Wars character catalog from SWAPI
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(about = "Star Wars character catalog with a local 24h cache")]
#[command(version)]
pub struct Cli {
    /// Keep the catalog in memory for this run only
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List every character
    List {
        /// Ignore the cached catalog and fetch every page again
        #[arg(long)]
        refresh: bool,
    },
    /// Show characters whose name contains QUERY (case-insensitive)
    Search {
        query: String,
    },
    /// Show one character, including species
    Show {
        id: u32,
    },
    /// Remove the cached catalog
    ClearCache,
    /// Print the effective configuration
    Config {
        /// Write a config file with the current values if none exists
        #[arg(long)]
        init: bool,
    },
}
