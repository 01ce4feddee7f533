//! Card filtering and ordering for catalog listings.

use std::cmp::Ordering;

use crate::card::PolicyCard;
use crate::vocab::{self, VocabField};

/// Category rank for ordering listings; loans and grants lead.
pub const CATEGORY_SORT_ORDER: &[&str] = &[
    "loan",
    "grant",
    "award",
    "subsidy",
    "waiver",
    "workstudy",
    "compensation",
    "channel",
    "assessment",
    "other",
];

const UNRANKED: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value `{value}` (expected one of: {})", .field.allowed().join(", "))]
pub struct UnknownValue {
    pub field: VocabField,
    pub value: String,
}

/// Criteria a card must meet to be listed. `None` matches every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Case-insensitive substring of the title, short title or any tag.
    pub search: Option<String>,
    /// Province slug; nationwide cards always match.
    pub province: Option<String>,
    pub stage: Option<String>,
    pub coverage: Option<String>,
    pub category: Option<String>,
    /// `Some(flag)` keeps only cards whose assessment requirement is known
    /// and equal to `flag`.
    pub assessment: Option<bool>,
    pub education_level: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}

impl CardFilter {
    /// Reject criteria outside their vocabulary.
    pub fn check(&self) -> Result<(), UnknownValue> {
        let constrained = [
            (VocabField::Stage, &self.stage),
            (VocabField::BenefitCoverage, &self.coverage),
            (VocabField::Category, &self.category),
            (VocabField::EducationLevel, &self.education_level),
            (VocabField::Level, &self.level),
            (VocabField::Status, &self.status),
        ];
        for (field, value) in constrained {
            if let Some(value) = value.as_deref().filter(|value| !field.contains(value)) {
                return Err(UnknownValue {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn matches(&self, card: &PolicyCard) -> bool {
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = card.title.to_lowercase().contains(&query)
                || card
                    .short_title
                    .as_deref()
                    .is_some_and(|short| short.to_lowercase().contains(&query))
                || card.tags.iter().any(|tag| tag.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        let in_province = self
            .province
            .as_deref()
            .is_none_or(|slug| card.is_nationwide() || card.province.as_deref() == Some(slug));
        let assessment_fits = self
            .assessment
            .is_none_or(|flag| card.requires_financial_assessment == Some(flag));

        in_province
            && assessment_fits
            && listed(&card.stage, self.stage.as_deref())
            && listed(&card.benefit_coverage, self.coverage.as_deref())
            && listed(&card.education_level, self.education_level.as_deref())
            && equals(&card.category, self.category.as_deref())
            && equals(&card.level, self.level.as_deref())
            && equals(&card.status, self.status.as_deref())
    }
}

fn listed(values: &[String], wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| values.iter().any(|value| value == wanted))
}

fn equals(value: &str, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| value == wanted)
}

/// A listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// P0 first; cards without a known priority last.
    Priority,
    /// Most recently verified evidence first.
    Verified,
    /// By [`CATEGORY_SORT_ORDER`].
    Category,
}

impl SortKey {
    pub fn compare(self, a: &PolicyCard, b: &PolicyCard) -> Ordering {
        match self {
            Self::Priority => rank(vocab::PRIORITY, a.priority.as_deref())
                .cmp(&rank(vocab::PRIORITY, b.priority.as_deref())),
            Self::Verified => latest_verified(b).cmp(latest_verified(a)),
            Self::Category => rank(CATEGORY_SORT_ORDER, Some(a.category.as_str()))
                .cmp(&rank(CATEGORY_SORT_ORDER, Some(b.category.as_str()))),
        }
    }
}

fn rank(order: &[&str], value: Option<&str>) -> usize {
    value
        .and_then(|value| order.iter().position(|known| *known == value))
        .unwrap_or(UNRANKED)
}

fn latest_verified(card: &PolicyCard) -> &str {
    card.verified_dates().max().unwrap_or("")
}

/// Stable sort by `keys` in turn; later keys break ties of earlier ones.
pub fn sort_cards(cards: &mut [&PolicyCard], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    cards.sort_by(|a, b| {
        keys.iter()
            .fold(Ordering::Equal, |order, key| order.then_with(|| key.compare(a, b)))
    });
}
