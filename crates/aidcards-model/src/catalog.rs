//! Read-side view over a data directory's collections.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::card::PolicyCard;
use crate::directory::{ChangelogEntry, Faq, GlossaryTerm, Province, SourceSite};
use crate::plan::ActionPlan;
use crate::query::{CardFilter, SortKey, sort_cards};
use crate::store::{Collection, StoreError, read_collection};
use crate::vocab;

/// All collections of one data directory. Missing files load as empty.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub cards: Vec<PolicyCard>,
    pub provinces: Vec<Province>,
    pub source_sites: Vec<SourceSite>,
    pub glossary: Vec<GlossaryTerm>,
    pub faqs: Vec<Faq>,
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCount {
    pub stage: String,
    pub cards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub card_count: usize,
    pub province_count: usize,
    pub source_site_count: usize,
    pub glossary_count: usize,
    pub faq_count: usize,
    pub changelog_count: usize,
    pub cards_by_stage: Vec<StageCount>,
    pub cards_by_status: BTreeMap<String, usize>,
    /// Cards lacking evidence, or citing any item without url/verified_date.
    pub incomplete_evidence_cards: usize,
    pub latest_verified_date: Option<String>,
}

impl Catalog {
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref();
        Ok(Self {
            cards: read_collection(dir, Collection::PolicyCards)?.unwrap_or_default(),
            provinces: read_collection(dir, Collection::Provinces)?.unwrap_or_default(),
            source_sites: read_collection(dir, Collection::SourceSites)?.unwrap_or_default(),
            glossary: read_collection(dir, Collection::Glossary)?.unwrap_or_default(),
            faqs: read_collection(dir, Collection::Faqs)?.unwrap_or_default(),
            changelog: read_collection(dir, Collection::Changelog)?.unwrap_or_default(),
        })
    }

    pub fn card(&self, card_id: &str) -> Option<&PolicyCard> {
        self.cards.iter().find(|card| card.card_id == card_id)
    }

    /// Cards pinned to `slug` plus nationwide cards, in collection order.
    pub fn cards_for_province(&self, slug: &str) -> Vec<&PolicyCard> {
        self.cards
            .iter()
            .filter(|card| card.is_nationwide() || card.province.as_deref() == Some(slug))
            .collect()
    }

    /// Cards meeting every criterion of `filter`, in collection order.
    pub fn filter(&self, filter: &CardFilter) -> Vec<&PolicyCard> {
        self.cards.iter().filter(|card| filter.matches(card)).collect()
    }

    /// Filtered cards, stably ordered by `keys`.
    pub fn sorted(&self, filter: &CardFilter, keys: &[SortKey]) -> Vec<&PolicyCard> {
        let mut cards = self.filter(filter);
        sort_cards(&mut cards, keys);
        cards
    }

    /// Display name for a province slug, falling back to the slug.
    pub fn province_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.provinces
            .iter()
            .find(|province| province.slug == slug)
            .map_or(slug, |province| province.name.as_str())
    }

    pub fn action_plan(&self, filter: &CardFilter) -> ActionPlan<'_> {
        ActionPlan {
            province: filter
                .province
                .as_deref()
                .map(|slug| self.province_name(slug).to_string()),
            stage: filter.stage.clone(),
            coverage: filter.coverage.clone(),
            cards: self.filter(filter),
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        summarize(self, &self.cards.iter().collect::<Vec<_>>())
    }

    /// Summary restricted to the cards visible for one province.
    pub fn province_summary(&self, slug: &str) -> CatalogSummary {
        summarize(self, &self.cards_for_province(slug))
    }
}

/// Latest non-empty `verified_date` across the cards' evidence.
///
/// Dates are ISO-like strings, so lexicographic order is chronological.
pub fn max_verified_date<'a>(cards: impl IntoIterator<Item = &'a PolicyCard>) -> Option<String> {
    cards
        .into_iter()
        .flat_map(|card| card.verified_dates())
        .max()
        .map(str::to_string)
}

fn summarize(catalog: &Catalog, cards: &[&PolicyCard]) -> CatalogSummary {
    let cards_by_stage = vocab::STAGE
        .iter()
        .map(|stage| StageCount {
            stage: stage.to_string(),
            cards: cards
                .iter()
                .filter(|card| card.stage.iter().any(|s| s.as_str() == *stage))
                .count(),
        })
        .collect();

    let mut cards_by_status = BTreeMap::new();
    for card in cards {
        *cards_by_status.entry(card.status.clone()).or_insert(0) += 1;
    }

    CatalogSummary {
        card_count: cards.len(),
        province_count: catalog.provinces.len(),
        source_site_count: catalog.source_sites.len(),
        glossary_count: catalog.glossary.len(),
        faq_count: catalog.faqs.len(),
        changelog_count: catalog.changelog.len(),
        cards_by_stage,
        cards_by_status,
        incomplete_evidence_cards: cards
            .iter()
            .filter(|card| !card.has_complete_evidence())
            .count(),
        latest_verified_date: max_verified_date(cards.iter().copied()),
    }
}
