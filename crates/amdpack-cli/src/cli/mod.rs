//! Command-line interface definition for amdpack.
//!
//! - `amdpack build` - Build every declared auto-bundle and its override documents
//! - `amdpack check` - Validate configuration and show emission order without writing

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, ProjectArgs};

/// amdpack - auto-bundler for AMD modules
#[derive(Parser, Debug)]
#[command(
    name = "amdpack",
    version,
    about = "Auto-bundler for AMD (RequireJS) modules",
    long_about = "amdpack reads auto-bundle declarations, follows each bundle's define/require\n\
                  dependencies, orders the files so dependencies load first, and writes one\n\
                  bundle per declaration plus a loader override document per configuration."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
