//! cli::args
//!
//! Command-line argument definitions using clap derive.

use clap::Parser;
use std::path::PathBuf;

/// Relnotes - release-notes generator for the Poshi test framework
#[derive(Parser, Debug)]
#[command(name = "relnotes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if relnotes was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Release-tracking ticket to link discovered tickets to
    #[arg(long)]
    pub release_ticket: Option<String>,

    /// Print the post and fragment without linking tickets or writing the changelog
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
