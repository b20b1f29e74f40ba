//! Customer use-case service.

use crate::error::{CoreError, CoreResult};
use crate::model::customer::{Customer, NewCustomer};
use crate::model::{CustomerId, PetId};
use crate::repo::customer_repo::CustomerRepository;
use log::{debug, info};

/// Use-case service wrapper for customer operations.
pub struct CustomerService<C: CustomerRepository> {
    customers: C,
}

impl<C: CustomerRepository> CustomerService<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    /// Creates a customer with an empty pet collection.
    pub fn create_customer(&self, draft: &NewCustomer) -> CoreResult<Customer> {
        let customer = self.customers.create_customer(draft)?;
        info!(
            "event=customer_create module=service status=ok customer_id={}",
            customer.id
        );
        Ok(customer)
    }

    pub fn get_customer(&self, id: CustomerId) -> CoreResult<Customer> {
        self.customers
            .get_customer(id)?
            .ok_or_else(|| CoreError::not_found("customer", id))
    }

    pub fn list_customers(&self) -> CoreResult<Vec<Customer>> {
        Ok(self.customers.list_customers()?)
    }

    /// Returns the owner of `pet_id`. `NotFound` names the pet, not the customer.
    pub fn customer_by_pet_id(&self, pet_id: PetId) -> CoreResult<Customer> {
        debug!("event=customer_by_pet module=service status=start pet_id={pet_id}");
        self.customers
            .find_by_pet_id(pet_id)?
            .ok_or_else(|| CoreError::not_found("pet", pet_id))
    }
}
