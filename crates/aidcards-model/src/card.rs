//! Policy card: the primary record published to the site.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One funding/assistance program instance.
///
/// Every field is serialized even when empty or null; the validator checks
/// key presence, so skipping nulls would turn an "unknown" into a violation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyCard {
    // ── Identity & description ──
    pub card_id: String,
    pub title: String,
    pub short_title: Option<String>,
    pub priority: Option<String>,
    pub level: String,
    pub region: String,
    pub province: Option<String>,

    // ── Classification ──
    pub stage: Vec<String>,
    pub category: String,
    pub education_level: Vec<String>,
    pub tags: Vec<String>,

    // ── Eligibility & benefit ──
    pub eligible_text: String,
    pub requires_financial_assessment: Option<bool>,
    pub benefit_summary: String,
    pub benefit_money_min: Option<Number>,
    pub benefit_money_max: Option<Number>,
    pub benefit_coverage: Vec<String>,
    pub benefit_frequency: Option<String>,
    pub stacking_rules: Option<String>,

    // ── Application ──
    pub application_window_text: String,
    pub application_steps: Vec<String>,
    pub apply_portals: Vec<ApplyPortal>,
    pub materials: Vec<String>,
    pub processing_time: Option<String>,
    pub contact: Option<String>,

    // ── Governance ──
    pub tongji_mapping_text: String,
    pub risk_notes: Option<String>,
    pub status: String,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub last_updated: String,
    pub change_note: Option<String>,

    // ── Provenance ──
    pub evidence_list: Vec<Evidence>,
}

/// A named application entry point.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyPortal {
    pub name: String,
    pub url: String,
}

/// A provenance citation attached to exactly one card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Evidence {
    pub source_name: Option<String>,
    pub url: Option<String>,
    pub doc_title: Option<String>,
    pub doc_no: Option<String>,
    pub published_date: Option<String>,
    pub verified_date: Option<String>,
    pub scope: Option<String>,
    pub quoted_excerpt: Option<String>,
}

impl Evidence {
    /// Whether the item carries both a URL and a verification date.
    pub fn is_complete(&self) -> bool {
        non_blank(self.url.as_deref()) && non_blank(self.verified_date.as_deref())
    }
}

impl PolicyCard {
    /// Non-empty verification dates across this card's evidence.
    pub fn verified_dates(&self) -> impl Iterator<Item = &str> {
        self.evidence_list
            .iter()
            .filter_map(|item| item.verified_date.as_deref())
            .filter(|date| !date.is_empty())
    }

    /// Whether the card cites at least one source and every citation is
    /// complete.
    pub fn has_complete_evidence(&self) -> bool {
        !self.evidence_list.is_empty() && self.evidence_list.iter().all(Evidence::is_complete)
    }

    /// Whether the card applies to every province (no province pinned).
    pub fn is_nationwide(&self) -> bool {
        self.province.is_none()
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
