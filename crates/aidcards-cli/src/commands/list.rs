use aidcards_model::{CardFilter, PolicyCard, SortKey, max_verified_date};
use serde::Serialize;

use crate::cli::SortArg;
use crate::config::Config;
use crate::support::{fail, load_catalog_or_exit, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardListing<'a> {
    card_count: usize,
    latest_verified_date: Option<String>,
    cards: Vec<&'a PolicyCard>,
}

fn sort_key(arg: SortArg) -> SortKey {
    match arg {
        SortArg::Priority => SortKey::Priority,
        SortArg::Verified => SortKey::Verified,
        SortArg::Category => SortKey::Category,
    }
}

fn print_text(listing: &CardListing<'_>) {
    println!(
        "[list] cards={} latest verified: {}",
        listing.card_count,
        listing.latest_verified_date.as_deref().unwrap_or("-")
    );
    for card in &listing.cards {
        println!(
            "  {}  {}  {}  {}",
            card.card_id,
            card.priority.as_deref().unwrap_or("-"),
            card.category,
            card.title
        );
    }
}

pub fn run(
    data_dir: Option<String>,
    filter: CardFilter,
    sort: Vec<SortArg>,
    json_output: bool,
    config: &Config,
) {
    filter.check().unwrap_or_else(|e| fail(e));
    let data_dir = config.data_dir(data_dir);
    let catalog = load_catalog_or_exit(&data_dir);

    let keys: Vec<SortKey> = sort.into_iter().map(sort_key).collect();
    let cards = catalog.sorted(&filter, &keys);
    tracing::debug!(matched = cards.len(), total = catalog.cards.len(), "filtered cards");
    let listing = CardListing {
        card_count: cards.len(),
        latest_verified_date: max_verified_date(cards.iter().copied()),
        cards,
    };

    if json_output {
        print_json(&listing, "card listing");
    } else {
        print_text(&listing);
    }
}
