//! Changelog checks, including card-id references.

use aidcards_model::Collection;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::fields::{self, Record};
use crate::report::{
    CLASS_CHANGELOG_CARD_IDS_INVALID, CLASS_CHANGELOG_FIELD_MISSING,
    CLASS_CHANGELOG_REFERENCE_UNKNOWN, Findings,
};

/// Check entry fields, and references when the card universe is known.
///
/// `card_ids` is `None` when policy cards could not be loaded; unknown
/// references are then not reported, since every reference would be.
pub fn check_changelog(
    entries: &[Record],
    card_ids: Option<&BTreeSet<String>>,
    findings: &mut Findings,
) {
    for (i, entry) in entries.iter().enumerate() {
        for key in ["date", "summary"] {
            if !fields::has_content(entry.get(key)) {
                findings.push(
                    Collection::Changelog,
                    CLASS_CHANGELOG_FIELD_MISSING,
                    format!("changelog[{i}]: missing {key}"),
                );
            }
        }

        let refs = match entry.get("card_ids") {
            None | Some(Value::Null) => continue,
            Some(Value::Array(refs)) => refs,
            Some(other) => {
                findings.push(
                    Collection::Changelog,
                    CLASS_CHANGELOG_CARD_IDS_INVALID,
                    format!("changelog[{i}]: card_ids must be an array, got {other}"),
                );
                continue;
            }
        };

        let Some(known) = card_ids else {
            continue;
        };
        for reference in refs {
            let exists = reference.as_str().is_some_and(|id| known.contains(id));
            if !exists {
                findings.push(
                    Collection::Changelog,
                    CLASS_CHANGELOG_REFERENCE_UNKNOWN,
                    format!(
                        "changelog[{i}]: references unknown card_id '{}'",
                        fields::render(Some(reference))
                    ),
                );
            }
        }
    }

    if card_ids.is_none() {
        tracing::debug!("policy cards unavailable; skipped changelog reference checks");
    }
}
