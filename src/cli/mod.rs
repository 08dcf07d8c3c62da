//! CLI module - Command-line interface for Reelsearch
//!
//! Without a subcommand the interactive menu starts.

mod commands;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};

/// Reelsearch - Movie catalog search
/// Searches films by title or by genre and release year, and reports what
/// people search for most.
#[derive(Parser)]
#[command(name = "reelsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (default)
    #[command(alias = "m")]
    Menu,

    /// Search films whose title contains the text
    #[command(alias = "t")]
    Title {
        /// Text to look for
        #[arg(required = true)]
        text: Vec<String>,
        /// Page to show
        #[arg(long, default_value = "1")]
        page: u64,
    },

    /// Search films of a genre released in a year or year range
    #[command(alias = "g")]
    Genre {
        /// Genre name, case-insensitive
        genre: String,
        /// First release year
        #[arg(long)]
        from: i32,
        /// Last release year, defaults to --from
        #[arg(long)]
        to: Option<i32>,
        /// Page to show
        #[arg(long, default_value = "1")]
        page: u64,
    },

    /// List genres and the release year range
    Genres,

    /// Show the most frequent searches
    #[command(alias = "p")]
    Popular {
        /// Number of entries to show
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
    },

    /// Show the most recent searches
    #[command(alias = "r")]
    Recent {
        /// Number of entries to show
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
    },

    /// Create default config file
    Init,

    /// Create the catalog schema in an empty database
    BootstrapCatalog,
}

pub use commands::*;
