use aidcards_model::CardFilter;

use crate::config::Config;
use crate::support::{EXIT_REJECTED, fail, load_catalog_or_exit};

pub fn run(data_dir: Option<String>, filter: CardFilter, card_ids: Vec<String>, config: &Config) {
    filter.check().unwrap_or_else(|e| fail(e));
    let data_dir = config.data_dir(data_dir);
    let catalog = load_catalog_or_exit(&data_dir);

    if let Some(unknown) = card_ids.iter().find(|id| catalog.card(id).is_none()) {
        eprintln!(
            "error: card `{unknown}` not found in {}",
            data_dir.display()
        );
        std::process::exit(EXIT_REJECTED);
    }

    let mut plan = catalog.action_plan(&filter);
    if !card_ids.is_empty() {
        plan.cards.retain(|card| card_ids.contains(&card.card_id));
    }
    println!("{}", plan.render());
}
