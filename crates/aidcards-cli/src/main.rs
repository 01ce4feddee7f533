//! aidcards CLI: the `aidcards` command.

mod cli;
mod commands;
mod config;
mod logging;
mod support;

use aidcards_model::CardFilter;
use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Convert { workbook, out } => commands::convert::run(workbook, out, &config),

        Commands::Validate { data_dir, json } => commands::validate::run(data_dir, json, &config),

        Commands::Build {
            workbook,
            out,
            json,
        } => commands::build::run(workbook, out, json, &config),

        Commands::Summary {
            data_dir,
            province,
            json,
        } => commands::summary::run(data_dir, province, json, &config),

        Commands::List {
            data_dir,
            search,
            province,
            stage,
            coverage,
            category,
            assessment,
            education_level,
            level,
            status,
            sort,
            json,
        } => {
            let filter = CardFilter {
                search,
                province,
                stage,
                coverage,
                category,
                assessment,
                education_level,
                level,
                status,
            };
            commands::list::run(data_dir, filter, sort, json, &config)
        }

        Commands::Plan {
            card_ids,
            data_dir,
            province,
            stage,
            coverage,
        } => {
            let filter = CardFilter {
                province,
                stage,
                coverage,
                ..CardFilter::default()
            };
            commands::plan::run(data_dir, filter, card_ids, &config)
        }

        Commands::Show { card_id, data_dir } => commands::show::run(card_id, data_dir, &config),
    }
}
