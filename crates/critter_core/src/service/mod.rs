//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the request layer uses.
//! - Translate repository errors into `CoreError` kinds.
//!
//! # Invariants
//! - Services receive their repositories through constructors; there is no
//!   ambient/global storage handle.
//! - Services never bypass repository validation or transaction contracts.

pub mod customer_service;
pub mod employee_service;
pub mod pet_service;
pub mod schedule_service;
