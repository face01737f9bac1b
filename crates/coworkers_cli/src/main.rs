//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `coworkers_core` linkage and storage bootstrap from a binary.
//! - Keep output deterministic for quick local sanity checks.

use coworkers_core::db::migrations::{current_version, latest_version};
use coworkers_core::db::open_db_in_memory;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("coworkers_core ping={}", coworkers_core::ping());
    println!("coworkers_core version={}", coworkers_core::core_version());

    let schema_version = open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| current_version(&conn).map_err(|err| err.to_string()));
    match schema_version {
        Ok(version) => {
            println!("coworkers_core schema={version}/{}", latest_version());
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("coworkers_core storage bootstrap failed: {message}");
            ExitCode::FAILURE
        }
    }
}
