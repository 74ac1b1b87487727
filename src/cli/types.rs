//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(name = "envstack")]
#[command(about = "Layered dotenv loading with typed validation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Report coercion failures as violations instead of stopping at the first
    #[arg(long, global = true)]
    pub collect: bool,

    /// Write file values into the process environment for keys it lacks
    #[arg(long, global = true)]
    pub inject: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a directory against a schema and report every violation
    Check(CheckArgs),

    /// Print the merged values and the layer each one came from
    Show(ShowArgs),
}
