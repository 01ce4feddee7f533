use crate::commands::{convert, validate};
use crate::config::Config;

pub fn run(workbook: Option<String>, out: Option<String>, json_output: bool, config: &Config) {
    let summary = convert::execute(workbook, out, config);
    // Stdout carries only the report in JSON mode.
    if json_output {
        eprintln!("{}", convert::export_line(&summary.output_dir));
    } else {
        println!("{}", convert::export_line(&summary.output_dir));
    }
    validate::report_and_exit_on_reject(&summary.output_dir, json_output);
}
