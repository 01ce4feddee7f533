//! PolicyCard checks.

use aidcards_model::{Collection, VocabField};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::fields::{self, Record};
use crate::report::{
    CLASS_CARD_ASSESSMENT_INVALID, CLASS_CARD_EVIDENCE_EMPTY, CLASS_CARD_EVIDENCE_INCOMPLETE,
    CLASS_CARD_FIELD_MISSING, CLASS_CARD_FIELD_TYPE_INVALID, CLASS_CARD_ID_DUPLICATE,
    CLASS_CARD_LIST_EMPTY, CLASS_CARD_MONEY_INVALID, CLASS_CARD_VOCABULARY_INVALID, Findings,
};

/// Keys every card object must carry, even when the value is null.
pub const REQUIRED_CARD_FIELDS: &[&str] = &[
    "card_id",
    "title",
    "level",
    "region",
    "stage",
    "category",
    "education_level",
    "eligible_text",
    "requires_financial_assessment",
    "benefit_summary",
    "application_window_text",
    "application_steps",
    "apply_portals",
    "materials",
    "tongji_mapping_text",
    "evidence_list",
    "status",
    "last_updated",
];

const ASSESSMENT_KEY: &str = "requires_financial_assessment";

/// JSON shape a card field must have when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Text,
    OptionalText,
    TextList,
    Money,
    Portals,
}

/// Fields whose type is not already implied by a vocabulary, tri-state or
/// evidence rule.
pub const CARD_FIELD_SHAPES: &[(&str, Shape)] = &[
    ("card_id", Shape::Text),
    ("title", Shape::Text),
    ("short_title", Shape::OptionalText),
    ("region", Shape::Text),
    ("province", Shape::OptionalText),
    ("tags", Shape::TextList),
    ("eligible_text", Shape::Text),
    ("benefit_summary", Shape::Text),
    ("benefit_money_min", Shape::Money),
    ("benefit_money_max", Shape::Money),
    ("benefit_coverage", Shape::TextList),
    ("benefit_frequency", Shape::OptionalText),
    ("stacking_rules", Shape::OptionalText),
    ("application_window_text", Shape::Text),
    ("application_steps", Shape::TextList),
    ("apply_portals", Shape::Portals),
    ("materials", Shape::TextList),
    ("processing_time", Shape::OptionalText),
    ("contact", Shape::OptionalText),
    ("tongji_mapping_text", Shape::Text),
    ("risk_notes", Shape::OptionalText),
    ("valid_from", Shape::OptionalText),
    ("valid_to", Shape::OptionalText),
    ("last_updated", Shape::Text),
    ("change_note", Shape::OptionalText),
];

/// Evidence keys; each is a string or null when present.
pub const EVIDENCE_FIELDS: &[&str] = &[
    "source_name",
    "url",
    "doc_title",
    "doc_no",
    "published_date",
    "verified_date",
    "scope",
    "quoted_excerpt",
];

/// Run every card rule and return the set of card ids seen, for changelog
/// reference checks.
pub fn check_policy_cards(cards: &[Record], findings: &mut Findings) -> BTreeSet<String> {
    let before = findings.len();
    let ids: Vec<&str> = cards
        .iter()
        .filter_map(|card| fields::text(card, "card_id"))
        .collect();
    let dups = fields::duplicates(ids.iter().copied());
    if !dups.is_empty() {
        findings.push(
            Collection::PolicyCards,
            CLASS_CARD_ID_DUPLICATE,
            format!("Duplicate card_id: {dups:?}"),
        );
    }

    for (i, card) in cards.iter().enumerate() {
        let cid = fields::label(card, "card_id", || format!("<row {i}>"));
        check_required(&cid, card, findings);
        check_shapes(&cid, card, findings);
        check_single_vocab(&cid, card, findings);
        check_list_vocab(&cid, card, VocabField::Stage, findings);
        check_list_vocab(&cid, card, VocabField::EducationLevel, findings);
        check_assessment(&cid, card, findings);
        check_evidence(&cid, card, findings);
    }

    tracing::debug!(
        cards = cards.len(),
        violations = findings.len() - before,
        "checked policy cards"
    );
    ids.into_iter().map(str::to_string).collect()
}

fn check_required(cid: &str, card: &Record, findings: &mut Findings) {
    for key in REQUIRED_CARD_FIELDS {
        if !card.contains_key(*key) {
            findings.push(
                Collection::PolicyCards,
                CLASS_CARD_FIELD_MISSING,
                format!("{cid}: missing field '{key}'"),
            );
        }
    }
}

fn check_shapes(cid: &str, card: &Record, findings: &mut Findings) {
    for (key, shape) in CARD_FIELD_SHAPES {
        let Some(value) = card.get(*key) else {
            continue;
        };
        let (fits, expected, class) = match shape {
            Shape::Text => (value.is_string(), "a string", CLASS_CARD_FIELD_TYPE_INVALID),
            Shape::OptionalText => (
                is_optional_text(value),
                "a string or null",
                CLASS_CARD_FIELD_TYPE_INVALID,
            ),
            Shape::TextList => (
                value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string)),
                "a list of strings",
                CLASS_CARD_FIELD_TYPE_INVALID,
            ),
            Shape::Money => (
                value.is_number() || value.is_null(),
                "a number or null",
                CLASS_CARD_MONEY_INVALID,
            ),
            Shape::Portals => (
                value.as_array().is_some_and(|items| items.iter().all(is_portal)),
                "a list of {name, url} string objects",
                CLASS_CARD_FIELD_TYPE_INVALID,
            ),
        };
        if !fits {
            findings.push(
                Collection::PolicyCards,
                class,
                format!("{cid}: {key} must be {expected}, got {value}"),
            );
        }
    }
}

fn is_optional_text(value: &Value) -> bool {
    value.is_string() || value.is_null()
}

fn is_portal(item: &Value) -> bool {
    item.as_object().is_some_and(|portal| {
        ["name", "url"]
            .iter()
            .all(|key| portal.get(*key).is_some_and(Value::is_string))
    })
}

fn check_single_vocab(cid: &str, card: &Record, findings: &mut Findings) {
    for field in [VocabField::Level, VocabField::Category, VocabField::Status] {
        let value = card.get(field.key());
        if !in_vocabulary(field, value) {
            push_invalid(cid, field, value, findings);
        }
    }

    // Priority may be null.
    let priority = card.get(VocabField::Priority.key());
    let is_null = matches!(priority, None | Some(Value::Null));
    if !is_null && !in_vocabulary(VocabField::Priority, priority) {
        push_invalid(cid, VocabField::Priority, priority, findings);
    }
}

fn in_vocabulary(field: VocabField, value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| field.contains(text))
}

fn push_invalid(cid: &str, field: VocabField, value: Option<&Value>, findings: &mut Findings) {
    findings.push(
        Collection::PolicyCards,
        CLASS_CARD_VOCABULARY_INVALID,
        format!("{cid}: invalid {field} {}", fields::render(value)),
    );
}

fn check_list_vocab(cid: &str, card: &Record, field: VocabField, findings: &mut Findings) {
    let items = match card.get(field.key()) {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            findings.push(
                Collection::PolicyCards,
                CLASS_CARD_LIST_EMPTY,
                format!("{cid}: {field} must be non-empty list"),
            );
            return;
        }
    };

    let bad: Vec<String> = items
        .iter()
        .filter(|item| !in_vocabulary(field, Some(item)))
        .map(|item| fields::render(Some(item)))
        .collect();
    if !bad.is_empty() {
        findings.push(
            Collection::PolicyCards,
            CLASS_CARD_VOCABULARY_INVALID,
            format!("{cid}: invalid {field} values {bad:?}"),
        );
    }
}

fn check_assessment(cid: &str, card: &Record, findings: &mut Findings) {
    match card.get(ASSESSMENT_KEY) {
        None => findings.push(
            Collection::PolicyCards,
            CLASS_CARD_FIELD_MISSING,
            format!("{cid}: {ASSESSMENT_KEY} must exist (true/false/null)"),
        ),
        Some(Value::Null | Value::Bool(_)) => {}
        Some(other) => findings.push(
            Collection::PolicyCards,
            CLASS_CARD_ASSESSMENT_INVALID,
            format!("{cid}: {ASSESSMENT_KEY} must be true/false/null, got {other}"),
        ),
    }
}

fn check_evidence(cid: &str, card: &Record, findings: &mut Findings) {
    let items = match card.get("evidence_list") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            findings.push(
                Collection::PolicyCards,
                CLASS_CARD_EVIDENCE_EMPTY,
                format!("{cid}: evidence_list must be non-empty array"),
            );
            return;
        }
    };

    for (j, item) in items.iter().enumerate() {
        let Some(evidence) = item.as_object() else {
            findings.push(
                Collection::PolicyCards,
                CLASS_CARD_EVIDENCE_INCOMPLETE,
                format!("{cid}: evidence[{j}] must be an object"),
            );
            continue;
        };
        for key in ["url", "verified_date"] {
            if !fields::has_content(evidence.get(key)) {
                findings.push(
                    Collection::PolicyCards,
                    CLASS_CARD_EVIDENCE_INCOMPLETE,
                    format!("{cid}: evidence[{j}] missing {key}"),
                );
            }
        }
        for key in EVIDENCE_FIELDS {
            let Some(value) = evidence.get(*key) else {
                continue;
            };
            if !is_optional_text(value) {
                findings.push(
                    Collection::PolicyCards,
                    CLASS_CARD_FIELD_TYPE_INVALID,
                    format!("{cid}: evidence[{j}].{key} must be a string or null, got {value}"),
                );
            }
        }
    }
}
