//! Catalog boot entry point.
//!
//! # Responsibility
//! - Read configuration from the environment and start logging.
//! - Build the shared catalog and hydrate it from the configured database.
//! - Print a short summary of what was loaded.

use log::error;
use pinboard_core::db::open_db;
use pinboard_core::{init_logging_from, CatalogConfig, CatalogService, SqliteBoardSource};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("pinboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CatalogConfig::from_env();
    init_logging_from(&config)?;

    let catalog = Arc::new(CatalogService::instrumented());

    if let Some(path) = config.database_path.as_ref() {
        let conn = open_db(path)?;
        let source = SqliteBoardSource::try_new(&conn)?;
        catalog.hydrate(&source)?;
    }

    let boards = catalog.get_all_boards()?;
    let pins = catalog.get_all_pins()?;
    println!("pinboard_core version={}", pinboard_core::core_version());
    println!("boards={} pins={}", boards.len(), pins.len());
    for board in boards {
        println!(
            "  [{}] {} pins={}",
            board.id(),
            board.name(),
            board.get_all_pins()?.len()
        );
    }
    Ok(())
}
