use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available amdpack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build all auto-bundles
    ///
    /// Writes each bundle to its output path and one `<config>.override.json`
    /// per configuration document.
    Build(BuildArgs),

    /// Validate configuration and preview bundles
    ///
    /// Resolves and orders every bundle in memory and prints the result.
    /// Nothing is written.
    Check(CheckArgs),
}

/// Project location and configuration documents
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Configuration document(s), relative to the project root
    ///
    /// When omitted, `amdpack.json`, `amdpack.toml` and `*.amdpack.json`
    /// in the project root are used.
    #[arg(short, long, value_name = "FILE")]
    pub config: Vec<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Build bundles but do not write any file
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print bundles and diagnostics as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
