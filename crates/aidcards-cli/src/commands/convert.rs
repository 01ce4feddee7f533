use aidcards_convert::{ConvertOptions, ConvertSummary, convert_workbook};
use std::path::Path;

use crate::config::Config;
use crate::support::fail;

/// Resolve paths and convert; shared with `build`.
pub fn execute(workbook: Option<String>, out: Option<String>, config: &Config) -> ConvertSummary {
    let workbook = config.workbook(workbook);
    let options = ConvertOptions {
        output_dir: config.data_dir(out),
        changelog: config.changelog_seed(),
    };
    if !workbook.exists() {
        fail(format!("workbook not found: {}", workbook.display()));
    }

    let summary = convert_workbook(&workbook, &options).unwrap_or_else(|e| fail(e));
    for (collection, count) in &summary.counts {
        tracing::debug!(%collection, records = count, "wrote collection");
    }
    summary
}

pub fn export_line(output_dir: &Path) -> String {
    let shown = std::path::absolute(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
    format!("✅ Exported JSON to: {}", shown.display())
}

pub fn run(workbook: Option<String>, out: Option<String>, config: &Config) {
    let summary = execute(workbook, out, config);
    println!("{}", export_line(&summary.output_dir));
}
