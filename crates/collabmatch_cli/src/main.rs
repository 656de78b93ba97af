//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `collabmatch_core` linkage and print store counters.
//! - Keep output deterministic for quick local sanity checks.

use collabmatch_core::db::{open_db, seed_demo_data};
use collabmatch_core::{init_logging_from_config, CoreConfig, SqliteCollabService};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("collabmatch_core ping={}", collabmatch_core::ping());
    println!("collabmatch_core version={}", collabmatch_core::core_version());

    match print_stats() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("collabmatch_core error={err}");
            ExitCode::FAILURE
        }
    }
}

fn print_stats() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;

    let mut conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    if config.seed_demo_data {
        let seeded = seed_demo_data(&mut conn).map_err(|err| err.to_string())?;
        println!("collabmatch_core seeded={seeded}");
    }

    let stats = SqliteCollabService::from_connection(&conn)
        .and_then(|service| service.get_stats())
        .map_err(|err| err.to_string())?;
    println!("collabmatch_core db_path={}", config.db_path.display());
    println!(
        "collabmatch_core users={} events={} projects={} looking={} unique_skills={}",
        stats.total_users,
        stats.total_events,
        stats.total_projects,
        stats.looking_for_project,
        stats.unique_skills
    );
    Ok(())
}
