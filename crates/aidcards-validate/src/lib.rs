//! # aidcards-validate
//!
//! Collect-all-errors validation of a policy-card data directory.
//!
//! Every check appends to a shared [`Findings`] accumulator and none stops
//! early, so one run reports every problem at once. The result is a
//! [`ValidationReport`] whose ordering is fully determined by the input
//! files: the same directory always yields the same report.
//!
//! Checks run on raw JSON objects rather than typed records, so a key that
//! is absent and a key that is null are reported differently. A collection
//! whose rules all pass is then read back as typed records, so an accepted
//! directory always loads into an `aidcards_model::Catalog`.

pub mod cards;
pub mod changelog;
pub mod fields;
pub mod readback;
pub mod reference;
pub mod registry;
pub mod report;

use aidcards_model::{
    ChangelogEntry, Collection, Faq, GlossaryTerm, PolicyCard, Province, SourceSite,
    read_collection_value,
};
use serde_json::Value;
use std::path::Path;

use crate::fields::Record;

pub use cards::{REQUIRED_CARD_FIELDS, check_policy_cards};
pub use changelog::check_changelog;
pub use readback::check_readable;
pub use reference::{check_faqs, check_glossary};
pub use registry::{check_provinces, check_source_sites};
pub use report::{
    ERROR_PREFIX, Findings, PASS_LINE, VALIDATE_CHECK_KIND, ValidationReport, ValidationSummary,
    Violation,
};

/// Collections whose absence is itself a violation.
pub const REQUIRED_COLLECTIONS: [Collection; 4] = [
    Collection::PolicyCards,
    Collection::Provinces,
    Collection::SourceSites,
    Collection::Changelog,
];

pub fn is_required(collection: Collection) -> bool {
    REQUIRED_COLLECTIONS.contains(&collection)
}

/// Validate every collection under `data_dir`.
pub fn validate_data_dir(data_dir: impl AsRef<Path>) -> ValidationReport {
    let data_dir = data_dir.as_ref();
    tracing::info!(data_dir = %data_dir.display(), "validating data directory");
    let mut findings = Findings::new();

    let cards = load_records(data_dir, Collection::PolicyCards, &mut findings);
    let card_ids = cards.as_ref().map(|cards| {
        findings.set_card_count(cards.len());
        let before = findings.len();
        let ids = check_policy_cards(cards, &mut findings);
        check_readable::<PolicyCard>(Collection::PolicyCards, cards, before, &mut findings);
        ids
    });

    if let Some(provinces) = load_records(data_dir, Collection::Provinces, &mut findings) {
        let before = findings.len();
        check_provinces(&provinces, &mut findings);
        check_readable::<Province>(Collection::Provinces, &provinces, before, &mut findings);
    }
    if let Some(sites) = load_records(data_dir, Collection::SourceSites, &mut findings) {
        let before = findings.len();
        check_source_sites(&sites, &mut findings);
        check_readable::<SourceSite>(Collection::SourceSites, &sites, before, &mut findings);
    }
    if let Some(entries) = load_records(data_dir, Collection::Changelog, &mut findings) {
        let before = findings.len();
        check_changelog(&entries, card_ids.as_ref(), &mut findings);
        check_readable::<ChangelogEntry>(Collection::Changelog, &entries, before, &mut findings);
    }
    if let Some(terms) = load_records(data_dir, Collection::Glossary, &mut findings) {
        let before = findings.len();
        check_glossary(&terms, &mut findings);
        check_readable::<GlossaryTerm>(Collection::Glossary, &terms, before, &mut findings);
    }
    if let Some(faqs) = load_records(data_dir, Collection::Faqs, &mut findings) {
        let before = findings.len();
        check_faqs(&faqs, &mut findings);
        check_readable::<Faq>(Collection::Faqs, &faqs, before, &mut findings);
    }

    let report = findings.into_report();
    tracing::info!(
        result = %report.result,
        violations = report.violations.len(),
        "validation finished"
    );
    report
}

/// Load one collection as a list of objects.
///
/// Missing, unreadable or malformed files become violations (absence only
/// for required collections) and yield `None`, skipping that collection's
/// checks.
fn load_records(
    data_dir: &Path,
    collection: Collection,
    findings: &mut Findings,
) -> Option<Vec<Record>> {
    let path = collection.path_in(data_dir);
    let value = match read_collection_value(data_dir, collection) {
        Ok(Some(value)) => value,
        Ok(None) => {
            if is_required(collection) {
                findings.push(
                    collection,
                    report::CLASS_COLLECTION_MISSING,
                    format!("Missing {}", path.display()),
                );
                findings.mark_missing(collection);
            } else {
                tracing::debug!(%collection, "optional collection absent");
            }
            return None;
        }
        Err(err) => {
            findings.push(collection, report::CLASS_COLLECTION_MALFORMED, err.to_string());
            return None;
        }
    };

    match records_from_value(value) {
        Some(records) => {
            findings.mark_checked();
            Some(records)
        }
        None => {
            findings.push(
                collection,
                report::CLASS_COLLECTION_MALFORMED,
                format!("{}: expected a JSON array of objects", path.display()),
            );
            None
        }
    }
}

/// A top-level array whose every element is an object.
pub fn records_from_value(value: Value) -> Option<Vec<Record>> {
    let Value::Array(items) = value else {
        return None;
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_require_an_array_of_objects() {
        assert_eq!(records_from_value(json!([{"a": 1}])).map(|r| r.len()), Some(1));
        assert!(records_from_value(json!([])).is_some_and(|r| r.is_empty()));
        assert!(records_from_value(json!({"a": 1})).is_none());
        assert!(records_from_value(json!([{"a": 1}, 2])).is_none());
    }

    #[test]
    fn required_collections_exclude_glossary_and_faqs() {
        assert!(is_required(Collection::PolicyCards));
        assert!(is_required(Collection::Changelog));
        assert!(!is_required(Collection::Glossary));
        assert!(!is_required(Collection::Faqs));
    }
}
