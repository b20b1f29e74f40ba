//! Core domain logic for the pet daycare scheduler.
//! This crate is the single source of truth for ownership, scheduling and
//! availability-matching invariants.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, NewCustomer};
pub use model::employee::{Employee, EmployeeSkill, NewEmployee};
pub use model::pet::{NewPet, Pet, PetType};
pub use model::schedule::{NewSchedule, Schedule};
pub use model::{CustomerId, EmployeeId, PetId, ScheduleId, ValidationError};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::pet_repo::{PetRepository, SqlitePetRepository};
pub use repo::schedule_repo::{ScheduleRepository, SqliteScheduleRepository};
pub use repo::{RepoError, RepoResult};
pub use service::customer_service::CustomerService;
pub use service::employee_service::{is_eligible, EmployeeService};
pub use service::pet_service::PetService;
pub use service::schedule_service::{CreateScheduleRequest, ScheduleService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
