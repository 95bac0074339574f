//! Formatting utilities for sizes, durations and build summaries.

use std::time::Duration;

use amdpack_bundler::{render_bundle, BuildReport, Bundle};
use amdpack_graph::logical_id;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Byte count with a binary unit.
///
/// ```
/// use amdpack_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.5 KiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let n = bytes as f64;
    if n < KIB {
        format!("{bytes} B")
    } else if n < MIB {
        format!("{:.1} KiB", n / KIB)
    } else {
        format!("{:.1} MiB", n / MIB)
    }
}

/// Wall-clock time of a run.
///
/// ```
/// use std::time::Duration;
/// use amdpack_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// ```
pub fn format_duration(elapsed: Duration) -> String {
    match elapsed.as_millis() {
        ms @ 0..1000 => format!("{ms}ms"),
        _ => format!("{:.1}s", elapsed.as_secs_f64()),
    }
}

/// Emission order of `bundle`, one logical module id per line.
pub fn format_bundle_order(bundle: &Bundle) -> String {
    let mut out = String::new();
    for (index, file) in bundle.files.iter().enumerate() {
        let id = logical_id(file.file_name.as_path(), &bundle.base_url);
        out.push_str(&format!("  {:>3}. {}\n", index + 1, id));
    }
    out
}

/// Print a per-bundle summary table to stderr.
pub fn print_build_summary(report: &BuildReport, elapsed: Duration) {
    eprintln!();
    for bundle in &report.bundles {
        let size = format_size(render_bundle(bundle).len() as u64);
        let files = format!("{} files", bundle.len());
        if colors_enabled() {
            eprintln!(
                "  {:<24} {:>10} {:>10}  {}",
                bundle.bundle_id.bold(),
                files,
                size.dimmed(),
                bundle.output.display().cyan()
            );
        } else {
            eprintln!(
                "  {:<24} {:>10} {:>10}  {}",
                bundle.bundle_id,
                files,
                size,
                bundle.output.display()
            );
        }
    }
    eprintln!();
    eprintln!(
        "  {} bundles, {} files in {}",
        report.bundles.len(),
        report.file_count(),
        format_duration(elapsed)
    );
}
