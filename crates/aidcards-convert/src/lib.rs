//! Workbook → JSON converter.
//!
//! Reads the `PolicyCards` and `Evidence` sheets, maps each row field by
//! field, joins evidence onto its card, and writes the six collections the
//! site consumes. Source sites are synthesized from evidence as placeholders.
//!
//! Missing sheets or columns abort the run; noisy cells degrade to null or
//! empty values and are left for the validator to flag.

pub mod cells;
pub mod convert;
pub mod error;
pub mod mapping;
pub mod seed;
pub mod sheet;
pub mod sources;
pub mod workbook;

pub use cells::{parse_portals, parse_tri_state, split_commas, split_lines, tri_state_from_text};
pub use convert::{
    Collections, ConvertOptions, ConvertSummary, build_collections, convert_workbook,
    write_collections,
};
pub use error::ConvertError;
pub use mapping::{EVIDENCE_COLUMNS, EVIDENCE_SHEET, POLICY_CARD_COLUMNS, POLICY_CARDS_SHEET};
pub use seed::ChangelogSeed;
pub use sheet::{Cell, Sheet};
pub use sources::{slugify, synthesize_source_sites};
pub use workbook::Workbook;

/// Conventional workbook location, relative to the invocation location.
pub const DEFAULT_WORKBOOK: &str = "data/安徽-同济资助政策网站_项目卡片主数据_按Schema填充_v1.xlsx";
