//! Violation accumulator and the deterministic report it produces.

use aidcards_model::Collection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const VALIDATE_CHECK_KIND: &str = "aidcards.data.validate.v1";
pub const REPORT_SCHEMA: u32 = 1;
pub const PASS_LINE: &str = "[PASS] validate passed";
pub const ERROR_PREFIX: &str = "ERROR:";

pub const CLASS_COLLECTION_MISSING: &str = "collection.missing";
pub const CLASS_COLLECTION_MALFORMED: &str = "collection.malformed";
pub const CLASS_RECORD_UNREADABLE: &str = "collection.record.unreadable";
pub const CLASS_CARD_ID_DUPLICATE: &str = "policycard.card_id.duplicate";
pub const CLASS_CARD_FIELD_MISSING: &str = "policycard.field.missing";
pub const CLASS_CARD_VOCABULARY_INVALID: &str = "policycard.vocabulary.invalid";
pub const CLASS_CARD_LIST_EMPTY: &str = "policycard.list.empty";
pub const CLASS_CARD_ASSESSMENT_INVALID: &str = "policycard.assessment.invalid";
pub const CLASS_CARD_EVIDENCE_EMPTY: &str = "policycard.evidence.empty";
pub const CLASS_CARD_EVIDENCE_INCOMPLETE: &str = "policycard.evidence.incomplete";
pub const CLASS_CARD_FIELD_TYPE_INVALID: &str = "policycard.field.type_invalid";
pub const CLASS_CARD_MONEY_INVALID: &str = "policycard.money.invalid";
pub const CLASS_PROVINCE_FIELD_MISSING: &str = "province.field.missing";
pub const CLASS_PROVINCE_SLUG_DUPLICATE: &str = "province.slug.duplicate";
pub const CLASS_SOURCE_FIELD_MISSING: &str = "sourcesite.field.missing";
pub const CLASS_SOURCE_VOCABULARY_INVALID: &str = "sourcesite.vocabulary.invalid";
pub const CLASS_SOURCE_ID_DUPLICATE: &str = "sourcesite.source_id.duplicate";
pub const CLASS_CHANGELOG_FIELD_MISSING: &str = "changelog.field.missing";
pub const CLASS_CHANGELOG_CARD_IDS_INVALID: &str = "changelog.card_ids.invalid";
pub const CLASS_CHANGELOG_REFERENCE_UNKNOWN: &str = "changelog.reference.unknown";
pub const CLASS_GLOSSARY_FIELD_MISSING: &str = "glossary.field.missing";
pub const CLASS_FAQ_FIELD_MISSING: &str = "faq.field.missing";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub collection: String,
    pub class: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub collections_checked: usize,
    pub missing_collections: Vec<String>,
    pub card_count: usize,
    pub violation_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub schema: u32,
    pub check_kind: String,
    pub result: String,
    pub failure_classes: Vec<String>,
    pub violations: Vec<Violation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn accepted(&self) -> bool {
        self.result == "accepted"
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    /// Text rendering: one `ERROR:` line per violation, or the pass line.
    pub fn render_lines(&self) -> Vec<String> {
        if self.violations.is_empty() {
            return vec![PASS_LINE.to_string()];
        }
        self.messages()
            .map(|message| format!("{ERROR_PREFIX} {message}"))
            .collect()
    }
}

/// Accumulates violations across independent checks. Nothing here returns
/// early; every check pushes and carries on.
#[derive(Debug, Default)]
pub struct Findings {
    violations: Vec<Violation>,
    checked: usize,
    missing: Vec<String>,
    card_count: usize,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, collection: Collection, class: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            collection: collection.label().to_string(),
            class: class.to_string(),
            message: message.into(),
        });
    }

    pub fn mark_checked(&mut self) {
        self.checked += 1;
    }

    pub fn mark_missing(&mut self, collection: Collection) {
        self.missing.push(collection.label().to_string());
    }

    pub fn set_card_count(&mut self, count: usize) {
        self.card_count = count;
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_report(self) -> ValidationReport {
        let failure_classes = self
            .violations
            .iter()
            .map(|v| v.class.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let result = if self.violations.is_empty() {
            "accepted"
        } else {
            "rejected"
        };
        let summary = ValidationSummary {
            collections_checked: self.checked,
            missing_collections: self.missing,
            card_count: self.card_count,
            violation_count: self.violations.len(),
        };
        ValidationReport {
            schema: REPORT_SCHEMA,
            check_kind: VALIDATE_CHECK_KIND.to_string(),
            result: result.to_string(),
            failure_classes,
            violations: self.violations,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_findings_accept_with_pass_line() {
        let report = Findings::new().into_report();
        assert!(report.accepted());
        assert_eq!(report.render_lines(), vec![PASS_LINE.to_string()]);
    }

    #[test]
    fn failure_classes_are_sorted_and_deduplicated() {
        let mut findings = Findings::new();
        findings.push(Collection::Provinces, CLASS_PROVINCE_FIELD_MISSING, "b");
        findings.push(Collection::PolicyCards, CLASS_CARD_FIELD_MISSING, "a");
        findings.push(Collection::Provinces, CLASS_PROVINCE_FIELD_MISSING, "c");

        let report = findings.into_report();
        assert!(!report.accepted());
        assert_eq!(
            report.failure_classes,
            vec![
                CLASS_CARD_FIELD_MISSING.to_string(),
                CLASS_PROVINCE_FIELD_MISSING.to_string(),
            ]
        );
        assert_eq!(report.render_lines(), vec!["ERROR: b", "ERROR: a", "ERROR: c"]);
    }
}
