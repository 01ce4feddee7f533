//! Province and source-site checks.

use aidcards_model::{Collection, VocabField};
use serde_json::Value;

use crate::fields::{self, Record};
use crate::report::{
    CLASS_PROVINCE_FIELD_MISSING, CLASS_PROVINCE_SLUG_DUPLICATE, CLASS_SOURCE_FIELD_MISSING,
    CLASS_SOURCE_ID_DUPLICATE, CLASS_SOURCE_VOCABULARY_INVALID, Findings,
};

pub fn check_provinces(provinces: &[Record], findings: &mut Findings) {
    for (i, province) in provinces.iter().enumerate() {
        let pid = fields::label(province, "slug", || format!("<province {i}>"));
        if !fields::has_content(province.get("name")) {
            findings.push(
                Collection::Provinces,
                CLASS_PROVINCE_FIELD_MISSING,
                format!("province '{pid}': missing name"),
            );
        }
        if !fields::has_content(province.get("slug")) {
            findings.push(
                Collection::Provinces,
                CLASS_PROVINCE_FIELD_MISSING,
                format!("province row {i}: missing slug"),
            );
        }
    }

    let dups = fields::duplicates(provinces.iter().filter_map(|p| fields::text(p, "slug")));
    if !dups.is_empty() {
        findings.push(
            Collection::Provinces,
            CLASS_PROVINCE_SLUG_DUPLICATE,
            format!("Duplicate province slug: {dups:?}"),
        );
    }
}

pub fn check_source_sites(sites: &[Record], findings: &mut Findings) {
    for (i, site) in sites.iter().enumerate() {
        let sid = fields::label(site, "source_id", || format!("<source {i}>"));
        if !fields::has_content(site.get("source_id")) {
            findings.push(
                Collection::SourceSites,
                CLASS_SOURCE_FIELD_MISSING,
                format!("source row {i}: missing source_id"),
            );
        }

        let scope = site.get(VocabField::ScopeLevel.key());
        let known = scope
            .and_then(Value::as_str)
            .is_some_and(|text| VocabField::ScopeLevel.contains(text));
        if !known {
            findings.push(
                Collection::SourceSites,
                CLASS_SOURCE_VOCABULARY_INVALID,
                format!("{sid}: invalid scope_level '{}'", fields::render(scope)),
            );
        }

        if !fields::has_content(site.get("homepage_url")) {
            findings.push(
                Collection::SourceSites,
                CLASS_SOURCE_FIELD_MISSING,
                format!("{sid}: missing homepage_url"),
            );
        }
    }

    let dups = fields::duplicates(sites.iter().filter_map(|s| fields::text(s, "source_id")));
    if !dups.is_empty() {
        findings.push(
            Collection::SourceSites,
            CLASS_SOURCE_ID_DUPLICATE,
            format!("Duplicate source_id: {dups:?}"),
        );
    }
    tracing::debug!(sites = sites.len(), "checked source sites");
}
