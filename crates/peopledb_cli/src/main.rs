//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `peopledb_core` linkage and store bootstrap from a shell.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `peopledb_cli [DB_PATH]`. Without a path an in-memory store is used.
//! Set `PEOPLEDB_LOG_DIR` (absolute) to enable file logging.

use log::info;
use peopledb_core::{
    default_log_level, init_logging, PersonApi, PersonService, SqlitePersonStore, StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("PEOPLEDB_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::file(path),
        None => StoreConfig::default(),
    };

    let store = match SqlitePersonStore::open(config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };
    let api = PersonApi::new(PersonService::new(store));

    println!("peopledb_core ping={}", peopledb_core::ping());
    println!("peopledb_core version={}", peopledb_core::core_version());
    if let Some(report) = api.health().body.data {
        println!("store={} status={}", report.store, report.status);
    }
    match api.service().count() {
        Ok(count) => {
            info!("event=cli_probe module=cli status=ok persons={count}");
            println!("persons={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to count persons: {err}");
            ExitCode::FAILURE
        }
    }
}
