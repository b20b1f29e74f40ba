//! Pet domain model.

use super::{identity_by_id, require_non_blank, CustomerId, PetId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Species handled by the daycare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    Cat,
    Dog,
    Lizard,
    Bird,
    Fish,
    Snake,
    Other,
}

/// Input for creating a pet under an existing customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    #[serde(rename = "type")]
    pub kind: PetType,
    pub name: String,
    pub owner_id: CustomerId,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewPet {
    pub fn new(kind: PetType, name: impl Into<String>, owner_id: CustomerId) -> Self {
        Self {
            kind,
            name: name.into(),
            owner_id,
            birth_date: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("pet", "name", &self.name)
    }
}

/// Persisted pet. `owner_id` always resolves to an existing customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    #[serde(rename = "type")]
    pub kind: PetType,
    pub name: String,
    pub owner_id: CustomerId,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

identity_by_id!(Pet);
