//! Pet use-case service.
//!
//! # Invariants
//! - Pets are only created through `create_pet`, which attaches them to an
//!   existing owner atomically.

use crate::error::{CoreError, CoreResult};
use crate::model::pet::{NewPet, Pet};
use crate::model::{CustomerId, PetId};
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::pet_repo::PetRepository;
use log::{info, warn};

/// Use-case service wrapper for pet operations.
pub struct PetService<P: PetRepository, C: CustomerRepository> {
    pets: P,
    customers: C,
}

impl<P: PetRepository, C: CustomerRepository> PetService<P, C> {
    pub fn new(pets: P, customers: C) -> Self {
        Self { pets, customers }
    }

    /// Persists a pet and appends it to its owner's collection.
    ///
    /// # Errors
    /// - `CoreError::NotFound` for the customer when `draft.owner_id` does not
    ///   resolve. Neither the pet nor the customer is written.
    /// - `CoreError::Validation` for blank names.
    pub fn create_pet(&self, draft: &NewPet) -> CoreResult<Pet> {
        match self.pets.attach_pet(draft) {
            Ok(pet) => {
                info!(
                    "event=pet_attach module=service status=ok pet_id={} customer_id={}",
                    pet.id, pet.owner_id
                );
                Ok(pet)
            }
            Err(err) => {
                let err = CoreError::from(err);
                warn!(
                    "event=pet_attach module=service status=error customer_id={} error_kind={:?}",
                    draft.owner_id,
                    err.kind()
                );
                Err(err)
            }
        }
    }

    pub fn get_pet(&self, id: PetId) -> CoreResult<Pet> {
        self.pets
            .get_pet(id)?
            .ok_or_else(|| CoreError::not_found("pet", id))
    }

    pub fn list_pets(&self) -> CoreResult<Vec<Pet>> {
        Ok(self.pets.list_pets()?)
    }

    /// Lists the pets of an existing customer; empty when they own none.
    pub fn list_pets_by_owner(&self, owner_id: CustomerId) -> CoreResult<Vec<Pet>> {
        if self.customers.get_customer(owner_id)?.is_none() {
            return Err(CoreError::not_found("customer", owner_id));
        }
        Ok(self.pets.list_pets_by_owner(owner_id)?)
    }
}
