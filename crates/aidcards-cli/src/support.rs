use aidcards_model::Catalog;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;

/// Exit code for failures that are not validation violations.
pub const EXIT_ERROR: i32 = 2;
/// Exit code for a rejected validation or an unknown lookup.
pub const EXIT_REJECTED: i32 = 1;

pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(EXIT_ERROR);
}

pub fn load_config_or_exit(explicit: Option<&str>) -> Config {
    Config::load(explicit).unwrap_or_else(|e| fail(e))
}

pub fn load_catalog_or_exit(data_dir: &Path) -> Catalog {
    if !data_dir.is_dir() {
        fail(format!("data directory not found: {}", data_dir.display()));
    }
    Catalog::load(data_dir).unwrap_or_else(|e| fail(e))
}

pub fn print_json<T: Serialize>(value: &T, what: &str) {
    let rendered = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("failed to render {what}: {e}")));
    println!("{rendered}");
}
