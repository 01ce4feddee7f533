//! Supporting collections: provinces, source sites, glossary, FAQs, changelog.

use serde::{Deserialize, Serialize};

use crate::card::Evidence;

/// A region descriptor. Seeded by hand, never derived from evidence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Province {
    pub name: String,
    pub slug: String,
    pub aliases: Vec<String>,
    pub order: u32,
}

/// A publishing organization cited by evidence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSite {
    pub source_id: String,
    pub name: String,
    pub scope_level: String,
    pub region: String,
    pub homepage_url: String,
    pub policy_index_urls: Vec<String>,
    pub contact_urls: Vec<String>,
    pub update_frequency: String,
    pub priority: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub q: String,
    pub a: String,
}

/// A dated record of which cards changed and how.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogEntry {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub card_ids: Vec<String>,
}
