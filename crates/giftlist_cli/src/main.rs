//! Command-line front end for the gift-registry store.
//!
//! # Responsibility
//! - Exercise the full core stack (config, medium, store) without a UI host.
//! - Mirror the registry page boundary: listing failures degrade to a
//!   warning plus an empty listing instead of aborting.

use giftlist_core::{
    init_logging, load_config, open_medium, parse_gift_category, supported_category_names,
    GiftRegistryStore, RegistryConfig, RowMedium,
};
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage:
  giftlist <config.toml> list
  giftlist <config.toml> add <item> <category>
  giftlist version";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command] if command == "version" => {
            println!("giftlist version={}", giftlist_core::core_version());
            ExitCode::SUCCESS
        }
        [config_path, command] if command == "list" => run_list(Path::new(config_path)),
        [config_path, command, item, category] if command == "add" => {
            run_add(Path::new(config_path), item, category)
        }
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run_list(config_path: &Path) -> ExitCode {
    let mut store = match open_store(config_path) {
        Ok(store) => store,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    // A listing failure is recoverable: warn and show an empty registry.
    let records = match store.list_gifts() {
        Ok(records) => records,
        Err(err) => {
            eprintln!("warning: could not load the gift list: {err}");
            Vec::new()
        }
    };

    if records.is_empty() {
        println!("no gifts claimed yet");
        return ExitCode::SUCCESS;
    }
    println!("claimed gifts ({}):", records.len());
    for record in &records {
        println!("  {}\t{}", record.item, record.category.as_str());
    }
    ExitCode::SUCCESS
}

fn run_add(config_path: &Path, item: &str, category: &str) -> ExitCode {
    let category = match parse_gift_category(category) {
        Ok(category) => category,
        Err(err) => {
            eprintln!(
                "error: {err}\nsupported categories: {}",
                supported_category_names().join(", ")
            );
            return ExitCode::FAILURE;
        }
    };
    let mut store = match open_store(config_path) {
        Ok(store) => store,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match store.add_gift(item, category) {
        Ok(record) => {
            println!(
                "added \"{}\" ({}) id={}",
                record.item,
                record.category.as_str(),
                record.id
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn open_store(config_path: &Path) -> Result<GiftRegistryStore<Box<dyn RowMedium>>, String> {
    let config = load_config(config_path).map_err(|err| err.to_string())?;
    init_configured_logging(&config)?;
    let medium = open_medium(&config.medium).map_err(|err| err.to_string())?;
    Ok(GiftRegistryStore::with_cache_ttl(medium, config.cache_ttl()))
}

fn init_configured_logging(config: &RegistryConfig) -> Result<(), String> {
    match &config.log {
        Some(log) => init_logging(&log.level, &log.dir),
        None => Ok(()),
    }
}
