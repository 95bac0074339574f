//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(amdpack_bundler::Error::Config(e)) => config_error_to_miette(e),
        // The bundler error carries its own code and help
        CliError::Bundler(e) => Report::new(e),
        CliError::Config(e) => config_error_to_miette(e),
        CliError::ProjectNotFound(path) => miette::miette!(
            code = "amdpack::project::not_found",
            help = "Pass an existing directory with --project",
            "Project directory not found: {}",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: amdpack_config::ConfigError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(
            code = "amdpack::config::invalid",
            help = hint,
            "Configuration error: {}",
            err
        ),
        None => miette::miette!(code = "amdpack::config::invalid", "Configuration error: {}", err),
    }
}
