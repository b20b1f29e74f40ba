//! Customer domain model.
//!
//! # Invariants
//! - `pet_ids` mirrors `pets.customer_id` in storage; it is never the
//!   source of truth on its own.
//! - The pet collection is append-only: no transfer or removal path exists.

use super::{identity_by_id, require_non_blank, CustomerId, PetId, ValidationError};
use serde::{Deserialize, Serialize};

/// Input for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone_number: String,
    pub notes: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            notes: None,
        }
    }

    /// Rejects blank names before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("customer", "name", &self.name)
    }
}

/// Persisted customer with the ids of the pets it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone_number: String,
    pub notes: Option<String>,
    /// Owned pets in creation order.
    pub pet_ids: Vec<PetId>,
}

identity_by_id!(Customer);

impl Customer {
    /// Appends a pet to the owned collection.
    ///
    /// Returns `false` when the pet is already listed; nothing is removed.
    pub fn attach_pet(&mut self, pet_id: PetId) -> bool {
        if self.pet_ids.contains(&pet_id) {
            return false;
        }
        self.pet_ids.push(pet_id);
        true
    }

    pub fn owns(&self, pet_id: PetId) -> bool {
        self.pet_ids.contains(&pet_id)
    }
}
