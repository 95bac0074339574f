//! Logging setup for the amdpack CLI.
//!
//! Libraries only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! # Verbosity Levels
//!
//! 1. `--verbose`: DEBUG for amdpack crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`: custom filter
//! 4. Default: INFO for amdpack crates

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str =
    "amdpack_cli=debug,amdpack_bundler=debug,amdpack_graph=debug,amdpack_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str =
    "amdpack_cli=info,amdpack_bundler=info,amdpack_graph=warn,amdpack_config=warn";

/// Filter for the given flags. `verbose` wins over `quiet`.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// Log lines go to stderr so that `check --json` output on stdout stays
/// machine-readable.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(build_filter(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
