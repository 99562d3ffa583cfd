//! CLI argument definitions for the formstate binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect per-field state of JSON documents
#[derive(Parser, Debug)]
#[command(name = "formstate")]
#[command(about = "formstate: per-field metadata shadowing nested JSON documents")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "human", env = "FORMSTATE_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every leaf of a JSON document with its path
    Flatten(FlattenArgs),
    /// Print touched, dirty and error state for every field of a JSON document
    Inspect(InspectArgs),
}

/// Arguments for the flatten command
#[derive(clap::Args, Debug)]
pub struct FlattenArgs {
    /// JSON document to flatten
    pub file: PathBuf,

    /// Separator placed between path segments
    #[arg(short, long, default_value_t = '.', env = "FORMSTATE_SEPARATOR")]
    pub separator: char,
}

/// Arguments for the inspect command
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// JSON document the form is built over
    pub file: PathBuf,

    /// Form configuration (initially touched/dirty fields, separator)
    #[arg(short, long, env = "FORMSTATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validation errors to fold, as a JSON array of {"key", "message"}
    #[arg(short, long)]
    pub errors: Option<PathBuf>,
}
