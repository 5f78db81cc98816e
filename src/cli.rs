//! Command-line flags of the `vendorhub` server binary.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// vendorhub - vendor directory, reviews and community polls API
#[derive(Debug, Parser)]
#[command(name = "vendorhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Listen address, overriding the configuration
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
