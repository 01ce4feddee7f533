use aidcards_model::CatalogSummary;

use crate::config::Config;
use crate::support::{load_catalog_or_exit, print_json};

fn print_text(summary: &CatalogSummary, province: Option<&str>) {
    match province {
        Some(slug) => println!("[summary] province={slug} cards={}", summary.card_count),
        None => println!("[summary] cards={}", summary.card_count),
    }
    println!(
        "  collections: provinces={} sourcesites={} glossary={} faqs={} changelog={}",
        summary.province_count,
        summary.source_site_count,
        summary.glossary_count,
        summary.faq_count,
        summary.changelog_count
    );
    for entry in &summary.cards_by_stage {
        println!("  stage {}: {}", entry.stage, entry.cards);
    }
    for (status, count) in &summary.cards_by_status {
        println!("  status {status}: {count}");
    }
    println!(
        "  incomplete evidence: {}",
        summary.incomplete_evidence_cards
    );
    println!(
        "  latest verified: {}",
        summary.latest_verified_date.as_deref().unwrap_or("-")
    );
}

pub fn run(data_dir: Option<String>, province: Option<String>, json_output: bool, config: &Config) {
    let data_dir = config.data_dir(data_dir);
    let catalog = load_catalog_or_exit(&data_dir);
    let summary = match province.as_deref() {
        Some(slug) => {
            if !catalog.provinces.iter().any(|p| p.slug == slug) {
                tracing::warn!(province = slug, "province slug not in provinces collection");
            }
            catalog.province_summary(slug)
        }
        None => catalog.summary(),
    };

    if json_output {
        print_json(&summary, "catalog summary");
    } else {
        print_text(&summary, province.as_deref());
    }
}
