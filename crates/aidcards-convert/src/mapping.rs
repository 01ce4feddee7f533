//! Row → record mapping for the two input sheets.

use aidcards_model::{Evidence, PolicyCard};
use std::collections::BTreeMap;

use crate::cells::{comma_list, line_list, parse_tri_state, portal_list};
use crate::error::ConvertError;
use crate::sheet::{Row, Sheet};

pub const POLICY_CARDS_SHEET: &str = "PolicyCards";
pub const EVIDENCE_SHEET: &str = "Evidence";

pub const POLICY_CARD_COLUMNS: &[&str] = &[
    "card_id",
    "title",
    "short_title",
    "priority",
    "level",
    "region",
    "province",
    "stage",
    "category",
    "education_level",
    "tags",
    "eligible_text",
    "requires_financial_assessment",
    "benefit_summary",
    "benefit_money_min",
    "benefit_money_max",
    "benefit_coverage",
    "benefit_frequency",
    "stacking_rules",
    "application_window_text",
    "application_steps",
    "apply_portals",
    "materials",
    "processing_time",
    "contact",
    "tongji_mapping_text",
    "risk_notes",
    "status",
    "valid_from",
    "valid_to",
    "last_updated",
    "change_note",
];

pub const EVIDENCE_COLUMNS: &[&str] = &[
    "card_id",
    "source_name",
    "url",
    "doc_title",
    "doc_no",
    "published_date",
    "verified_date",
    "scope",
    "quoted_excerpt",
];

/// Evidence grouped by owning `card_id`, groups in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct EvidenceIndex {
    order: Vec<String>,
    groups: BTreeMap<String, Vec<Evidence>>,
}

impl EvidenceIndex {
    pub fn push(&mut self, card_id: String, item: Evidence) {
        if !self.groups.contains_key(&card_id) {
            self.order.push(card_id.clone());
        }
        self.groups.entry(card_id).or_default().push(item);
    }

    pub fn get(&self, card_id: &str) -> &[Evidence] {
        self.groups.get(card_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Card ids in the order their first evidence row appeared.
    pub fn card_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn evidence_from_row(row: &Row<'_>) -> Evidence {
    Evidence {
        source_name: row.text("source_name"),
        url: row.text("url"),
        doc_title: row.text("doc_title"),
        doc_no: row.text("doc_no"),
        published_date: row.text("published_date"),
        verified_date: row.text("verified_date"),
        scope: row.text("scope"),
        quoted_excerpt: row.text("quoted_excerpt"),
    }
}

/// Read the Evidence sheet into per-card groups, preserving row order.
pub fn index_evidence(sheet: &Sheet) -> Result<EvidenceIndex, ConvertError> {
    let columns = sheet.columns(EVIDENCE_COLUMNS)?;
    let mut index = EvidenceIndex::default();
    for row in sheet.records(&columns) {
        let card_id = row.text_or_empty("card_id");
        index.push(card_id, evidence_from_row(&row));
    }
    tracing::debug!(
        rows = index.len(),
        cards = index.card_ids().count(),
        "indexed evidence"
    );
    Ok(index)
}

pub fn card_from_row(row: &Row<'_>, evidence: &EvidenceIndex) -> PolicyCard {
    let card_id = row.text_or_empty("card_id");
    let evidence_list = evidence.get(&card_id).to_vec();
    PolicyCard {
        title: row.text_or_empty("title"),
        short_title: row.text("short_title"),
        priority: row.text("priority"),
        level: row.text_or_empty("level"),
        region: row.text_or_empty("region"),
        province: row.text("province"),
        stage: comma_list(row.cell("stage")),
        category: row.text_or_empty("category"),
        education_level: comma_list(row.cell("education_level")),
        tags: comma_list(row.cell("tags")),
        eligible_text: row.text_or_empty("eligible_text"),
        requires_financial_assessment: parse_tri_state(row.cell("requires_financial_assessment")),
        benefit_summary: row.text_or_empty("benefit_summary"),
        benefit_money_min: row.cell("benefit_money_min").as_number(),
        benefit_money_max: row.cell("benefit_money_max").as_number(),
        benefit_coverage: comma_list(row.cell("benefit_coverage")),
        benefit_frequency: row.text("benefit_frequency"),
        stacking_rules: row.text("stacking_rules"),
        application_window_text: row.text_or_empty("application_window_text"),
        application_steps: line_list(row.cell("application_steps")),
        apply_portals: portal_list(row.cell("apply_portals")),
        materials: line_list(row.cell("materials")),
        processing_time: row.text("processing_time"),
        contact: row.text("contact"),
        tongji_mapping_text: row.text_or_empty("tongji_mapping_text"),
        risk_notes: row.text("risk_notes"),
        status: row.text_or_empty("status"),
        valid_from: row.text("valid_from"),
        valid_to: row.text("valid_to"),
        last_updated: row.text_or_empty("last_updated"),
        change_note: row.text("change_note"),
        evidence_list,
        card_id,
    }
}

/// Read the PolicyCards sheet, attaching each card's evidence group.
pub fn cards_from_sheet(
    sheet: &Sheet,
    evidence: &EvidenceIndex,
) -> Result<Vec<PolicyCard>, ConvertError> {
    let columns = sheet.columns(POLICY_CARD_COLUMNS)?;
    let cards: Vec<PolicyCard> = sheet
        .records(&columns)
        .map(|row| card_from_row(&row, evidence))
        .collect();

    let without_evidence = cards
        .iter()
        .filter(|card| card.evidence_list.is_empty())
        .count();
    if without_evidence > 0 {
        tracing::warn!(
            cards = without_evidence,
            "policy cards without any evidence rows"
        );
    }
    let incomplete = cards
        .iter()
        .filter(|card| !card.evidence_list.is_empty() && !card.has_complete_evidence())
        .count();
    if incomplete > 0 {
        tracing::warn!(
            cards = incomplete,
            "policy cards citing evidence without url or verified_date"
        );
    }
    tracing::info!(cards = cards.len(), "mapped policy cards");
    Ok(cards)
}
