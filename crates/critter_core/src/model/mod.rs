//! Daycare domain model: customers, pets, employees and schedules.
//!
//! # Responsibility
//! - Define the records shared by repositories and services.
//! - Validate draft input before any persistence is attempted.
//!
//! # Invariants
//! - Persisted records are identified by a store-generated `i64` id and
//!   compare/hash by that id only.
//! - Every pet has exactly one owning customer.
//! - Availability and skills are sets; schedule activities keep input order.

use thiserror::Error;

pub mod customer;
pub mod employee;
pub mod pet;
pub mod schedule;

/// Store-generated identifier of a customer row.
pub type CustomerId = i64;
/// Store-generated identifier of a pet row.
pub type PetId = i64;
/// Store-generated identifier of an employee row.
pub type EmployeeId = i64;
/// Store-generated identifier of a schedule row.
pub type ScheduleId = i64;

/// Draft input rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity} {field} must not be blank")]
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

pub(crate) fn require_non_blank(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Implements id-only equality and hashing for persisted records.
macro_rules! identity_by_id {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

pub(crate) use identity_by_id;
