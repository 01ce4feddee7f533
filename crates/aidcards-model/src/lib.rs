//! # aidcards-model
//!
//! Shared data layer for the policy-card pipeline.
//!
//! This crate provides:
//! - `PolicyCard`/`Evidence` and the supporting collection records
//! - the controlled vocabularies and their display labels
//! - JSON collection read/write (the converter ↔ validator interface)
//! - `Catalog`, a typed read-side view with filtering, ordering and the
//!   stage-grouped action plan
//!
//! ## Data directory
//!
//! ```text
//! src/data/
//!   policycards.json   ← PolicyCard[] with nested evidence_list
//!   provinces.json     ← Province[] (seeded)
//!   sourcesites.json   ← SourceSite[] (derived from evidence)
//!   glossary.json      ← GlossaryTerm[]
//!   faqs.json          ← Faq[]
//!   changelog.json     ← ChangelogEntry[] (card_ids reference policycards)
//! ```

pub mod card;
pub mod catalog;
pub mod directory;
pub mod plan;
pub mod query;
pub mod store;
pub mod vocab;

pub use card::{ApplyPortal, Evidence, PolicyCard};
pub use catalog::{Catalog, CatalogSummary, StageCount, max_verified_date};
pub use directory::{ChangelogEntry, Faq, GlossaryTerm, Province, SourceSite};
pub use plan::ActionPlan;
pub use query::{CardFilter, SortKey, UnknownValue, sort_cards};
pub use store::{
    Collection, StoreError, read_collection, read_collection_value, render_collection,
    write_collection,
};
pub use vocab::{VOCABULARIES, VocabField};

/// Conventional data directory, relative to the invocation location.
pub const DEFAULT_DATA_DIR: &str = "src/data";
