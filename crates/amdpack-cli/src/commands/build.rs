//! Build command implementation.

use std::time::Instant;

use amdpack_bundler::{compose, override_path_for, write_all};

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// 1. Check the project root exists
/// 2. Load and validate configuration
/// 3. Build every bundle
/// 4. Write bundles and override documents (skipped with `--dry-run`)
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start = Instant::now();

    let config = utils::load_config(&args.project)?;
    ui::info(&format!("Building {} bundles...", config.bundles.len()));

    let report = utils::build_bundles(&config).await?;
    let overrides = compose(&report.bundles);

    if args.dry_run {
        for bundle in &report.bundles {
            ui::info(&format!("Would write {}", bundle.output.display()));
        }
        for config_path in overrides.keys() {
            ui::info(&format!("Would write {}", override_path_for(config_path).display()));
        }
    } else {
        let summary = write_all(&report.bundles, &overrides)?;
        tracing::debug!("Wrote {:?}", summary);
    }

    ui::print_build_summary(&report, start.elapsed());

    if report.has_diagnostics() {
        ui::warning(&format!("Finished with {} warnings", report.diagnostics.len()));
    } else {
        ui::success("Build complete");
    }

    Ok(())
}
