//! Conversion pipeline: workbook → six JSON collections on disk.

use aidcards_model::{
    ChangelogEntry, Collection, Faq, GlossaryTerm, PolicyCard, Province, SourceSite,
    write_collection,
};
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::mapping::{cards_from_sheet, index_evidence};
use crate::seed::{self, ChangelogSeed};
use crate::sources::synthesize_source_sites;
use crate::workbook::Workbook;

/// Everything one conversion emits.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub cards: Vec<PolicyCard>,
    pub provinces: Vec<Province>,
    pub source_sites: Vec<SourceSite>,
    pub glossary: Vec<GlossaryTerm>,
    pub faqs: Vec<Faq>,
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub output_dir: PathBuf,
    pub changelog: ChangelogSeed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output_dir: PathBuf,
    pub counts: Vec<(Collection, usize)>,
}

impl ConvertSummary {
    pub fn count(&self, collection: Collection) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Build every collection from the decoded workbook without touching disk.
pub fn build_collections(
    workbook: &Workbook,
    changelog: &ChangelogSeed,
) -> Result<Collections, ConvertError> {
    let evidence = index_evidence(&workbook.evidence)?;
    let cards = cards_from_sheet(&workbook.policy_cards, &evidence)?;

    // Card order first, then evidence whose card_id has no card row.
    let card_ids: Vec<&str> = cards.iter().map(|card| card.card_id.as_str()).collect();
    let orphan_ids: Vec<&str> = evidence
        .card_ids()
        .filter(|id| !card_ids.contains(id))
        .collect();
    if !orphan_ids.is_empty() {
        tracing::warn!(card_ids = ?orphan_ids, "evidence rows reference unknown cards");
    }
    let traversal = card_ids
        .iter()
        .chain(orphan_ids.iter())
        .flat_map(|id| evidence.get(id));
    let source_sites = synthesize_source_sites(traversal);
    tracing::info!(sites = source_sites.len(), "synthesized source sites");

    let changelog = seed::changelog(changelog, &cards);
    Ok(Collections {
        provinces: seed::provinces(),
        source_sites,
        glossary: seed::glossary(),
        faqs: seed::faqs(),
        changelog,
        cards,
    })
}

/// Write all six collections, each as a whole-file replace.
pub fn write_collections(
    output_dir: impl AsRef<Path>,
    collections: &Collections,
) -> Result<ConvertSummary, ConvertError> {
    let dir = output_dir.as_ref();
    write_collection(dir, Collection::PolicyCards, &collections.cards)?;
    write_collection(dir, Collection::Provinces, &collections.provinces)?;
    write_collection(dir, Collection::SourceSites, &collections.source_sites)?;
    write_collection(dir, Collection::Glossary, &collections.glossary)?;
    write_collection(dir, Collection::Faqs, &collections.faqs)?;
    write_collection(dir, Collection::Changelog, &collections.changelog)?;

    Ok(ConvertSummary {
        output_dir: dir.to_path_buf(),
        counts: vec![
            (Collection::PolicyCards, collections.cards.len()),
            (Collection::Provinces, collections.provinces.len()),
            (Collection::SourceSites, collections.source_sites.len()),
            (Collection::Glossary, collections.glossary.len()),
            (Collection::Faqs, collections.faqs.len()),
            (Collection::Changelog, collections.changelog.len()),
        ],
    })
}

/// Open the workbook, convert it, and write the output directory.
pub fn convert_workbook(
    workbook_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    let workbook_path = workbook_path.as_ref();
    tracing::info!(workbook = %workbook_path.display(), "converting workbook");
    let workbook = Workbook::open(workbook_path)?;
    let collections = build_collections(&workbook, &options.changelog)?;
    write_collections(&options.output_dir, &collections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{
        EVIDENCE_COLUMNS, EVIDENCE_SHEET, POLICY_CARD_COLUMNS, POLICY_CARDS_SHEET,
    };
    use crate::sheet::{Cell, Sheet};

    fn row(columns: &[&str], values: &[(&str, &str)]) -> Vec<Cell> {
        columns
            .iter()
            .map(|column| {
                values
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| Cell::text(*value))
                    .unwrap_or_default()
            })
            .collect()
    }

    fn evidence_row(card_id: &str, source_name: &str) -> Vec<Cell> {
        row(
            EVIDENCE_COLUMNS,
            &[("card_id", card_id), ("source_name", source_name)],
        )
    }

    fn sheet(name: &str, columns: &[&str], rows: Vec<Vec<Cell>>) -> Sheet {
        Sheet::new(name, columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn seed() -> ChangelogSeed {
        ChangelogSeed {
            date: "2026-02-11".to_string(),
            kind: "init".to_string(),
            summary: "first batch".to_string(),
        }
    }

    #[test]
    fn source_sites_follow_card_order_then_orphans() {
        let workbook = Workbook {
            policy_cards: sheet(
                POLICY_CARDS_SHEET,
                POLICY_CARD_COLUMNS,
                vec![
                    row(POLICY_CARD_COLUMNS, &[("card_id", "card-b")]),
                    row(POLICY_CARD_COLUMNS, &[("card_id", "card-a")]),
                ],
            ),
            evidence: sheet(
                EVIDENCE_SHEET,
                EVIDENCE_COLUMNS,
                vec![
                    evidence_row("orphan", "财政部"),
                    evidence_row("card-a", "同济大学"),
                    evidence_row("card-b", "安徽省教育厅"),
                    evidence_row("card-b", "同济大学"),
                ],
            ),
        };

        let collections = build_collections(&workbook, &seed()).expect("conversion succeeds");
        let names: Vec<&str> = collections
            .source_sites
            .iter()
            .map(|site| site.name.as_str())
            .collect();
        assert_eq!(names, vec!["安徽省教育厅", "同济大学", "财政部"]);
        assert_eq!(collections.changelog[0].card_ids, vec!["card-b", "card-a"]);
        assert_eq!(collections.provinces[0].slug, "anhui");
        assert_eq!(collections.cards[1].evidence_list.len(), 1);
    }

    #[test]
    fn missing_evidence_column_aborts() {
        let workbook = Workbook {
            policy_cards: sheet(POLICY_CARDS_SHEET, POLICY_CARD_COLUMNS, Vec::new()),
            evidence: sheet(EVIDENCE_SHEET, &["card_id", "url"], Vec::new()),
        };
        let err = build_collections(&workbook, &seed()).expect_err("should abort");
        assert!(matches!(
            err,
            ConvertError::MissingColumns { ref sheet, .. } if sheet == "Evidence"
        ));
    }
}
