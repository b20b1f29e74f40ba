//! CLI inspection entry point.
//!
//! # Responsibility
//! - Open the configured daycare database (migrating it if needed).
//! - Print the core version and per-aggregate row counts.

use critter_core::db::open_db;
use critter_core::{
    core_version, init_logging, CoreConfig, CustomerRepository, EmployeeRepository, PetRepository,
    ScheduleRepository, SqliteCustomerRepository, SqliteEmployeeRepository, SqlitePetRepository,
    SqliteScheduleRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("critter: {err}");
            let mut cause = err.source();
            while let Some(current) = cause {
                eprintln!("  caused by: {current}");
                cause = current.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let customers = SqliteCustomerRepository::try_new(&conn)?.list_customers()?;
    let pets = SqlitePetRepository::try_new(&conn)?.list_pets()?;
    let employees = SqliteEmployeeRepository::try_new(&conn)?.list_employees()?;
    let schedules = SqliteScheduleRepository::try_new(&conn)?.list_schedules()?;

    println!("critter_core version={}", core_version());
    println!("database={}", config.db_path.display());
    println!(
        "customers={} pets={} employees={} schedules={}",
        customers.len(),
        pets.len(),
        employees.len(),
        schedules.len()
    );
    log::info!(
        "event=cli_summary module=cli status=ok customers={} pets={} employees={} schedules={}",
        customers.len(),
        pets.len(),
        employees.len(),
        schedules.len()
    );
    Ok(())
}
