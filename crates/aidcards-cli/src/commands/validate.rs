use aidcards_validate::{ValidationReport, validate_data_dir};
use std::path::Path;

use crate::config::Config;
use crate::support::{EXIT_REJECTED, print_json};

/// Validate `data_dir`, print the report, and exit 1 on violations.
pub fn report_and_exit_on_reject(data_dir: &Path, json_output: bool) -> ValidationReport {
    let report = validate_data_dir(data_dir);
    if json_output {
        print_json(&report, "validation report");
    } else {
        for line in report.render_lines() {
            println!("{line}");
        }
    }

    if !report.accepted() {
        std::process::exit(EXIT_REJECTED);
    }
    report
}

pub fn run(data_dir: Option<String>, json_output: bool, config: &Config) {
    let data_dir = config.data_dir(data_dir);
    report_and_exit_on_reject(&data_dir, json_output);
}
