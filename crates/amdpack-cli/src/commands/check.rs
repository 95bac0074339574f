//! Check command implementation.
//!
//! Validates configuration and previews every bundle without writing.

use serde::Serialize;

use amdpack_bundler::{compose, BuildDiagnostic, Bundle, OverrideDocument};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput<'a> {
    bundles: Vec<BundlePreview<'a>>,
    diagnostics: &'a [BuildDiagnostic],
    overrides: Vec<&'a OverrideDocument>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BundlePreview<'a> {
    bundle_id: &'a str,
    output: &'a std::path::Path,
    containing_config: &'a std::path::Path,
    files: Vec<String>,
}

impl<'a> BundlePreview<'a> {
    fn new(bundle: &'a Bundle) -> Self {
        Self {
            bundle_id: &bundle.bundle_id,
            output: &bundle.output,
            containing_config: &bundle.containing_config,
            files: bundle
                .files
                .iter()
                .map(|file| file.file_name.to_string())
                .collect(),
        }
    }
}

/// Execute the check command.
///
/// Fatal errors (missing project, invalid configuration, empty bundles)
/// fail the command. Unresolved dependencies and forced flushes are
/// reported but do not.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = utils::load_config(&args.project)?;
    ui::success(&format!(
        "Configuration is valid ({} bundles in {} documents)",
        config.bundles.len(),
        config.documents.len()
    ));

    let report = utils::build_bundles(&config).await?;

    if args.json {
        let overrides = compose(&report.bundles);
        let output = CheckOutput {
            bundles: report.bundles.iter().map(BundlePreview::new).collect(),
            diagnostics: &report.diagnostics,
            overrides: overrides.values().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for bundle in &report.bundles {
        println!("{} -> {}", bundle.bundle_id, bundle.output.display());
        print!("{}", ui::format_bundle_order(bundle));
    }

    if report.has_diagnostics() {
        ui::warning(&format!("{} warnings", report.diagnostics.len()));
    } else {
        ui::success("All bundles ordered without warnings");
    }

    Ok(())
}
