use crate::config::Config;
use crate::support::{EXIT_REJECTED, load_catalog_or_exit, print_json};

pub fn run(card_id: String, data_dir: Option<String>, config: &Config) {
    let data_dir = config.data_dir(data_dir);
    let catalog = load_catalog_or_exit(&data_dir);
    let Some(card) = catalog.card(&card_id) else {
        eprintln!(
            "error: card `{card_id}` not found in {}",
            data_dir.display()
        );
        std::process::exit(EXIT_REJECTED);
    };
    print_json(card, "policy card");
}
