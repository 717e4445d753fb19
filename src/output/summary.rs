//! Human-readable run summary printed after the JSON file is written.

use std::io::Write;
use std::path::Path;

use yansi::Paint;

use crate::inventory::ScanSummary;

/// Write the end-of-run summary to `writer`.
///
/// Colors follow the global yansi setting, which the binary turns off for
/// `--no-color` and non-terminal output.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &ScanSummary,
    output_path: &Path,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "File Read Completed in {}",
        format!("{:.2?}", summary.scan_duration).bold()
    )?;
    writeln!(
        writer,
        "Found {} items ({})",
        summary.total_files.to_string().bold(),
        summary.total_size_display()
    )?;

    if let Some(algorithm) = summary.key_algorithm {
        let groups = summary.duplicate_groups.to_string();
        let groups = if summary.duplicate_groups > 0 {
            groups.yellow().bold()
        } else {
            groups.green().bold()
        };
        writeln!(
            writer,
            "Found {} Duplicate Items by {} ({}, {} reclaimable, {:.1}%)",
            groups,
            algorithm,
            plural(summary.duplicate_files, "file"),
            summary.reclaimable_display(),
            summary.wasted_percentage()
        )?;
    }

    writeln!(
        writer,
        "Data written to: {}",
        output_path.display().to_string().cyan()
    )?;
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
