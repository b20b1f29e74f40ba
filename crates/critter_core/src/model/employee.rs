//! Employee domain model.
//!
//! # Invariants
//! - `days_available` and `skills` are sets; duplicates collapse on input.

use super::{identity_by_id, require_non_blank, EmployeeId, ValidationError};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Service capability an employee may hold. Also used as schedule activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeSkill {
    Petting,
    Walking,
    Feeding,
    Medicating,
    Shaving,
    Bathing,
}

/// Input for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub skills: HashSet<EmployeeSkill>,
    pub days_available: HashSet<Weekday>,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        skills: impl IntoIterator<Item = EmployeeSkill>,
        days_available: impl IntoIterator<Item = Weekday>,
    ) -> Self {
        Self {
            name: name.into(),
            skills: skills.into_iter().collect(),
            days_available: days_available.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("employee", "name", &self.name)
    }
}

/// Persisted employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub skills: HashSet<EmployeeSkill>,
    pub days_available: HashSet<Weekday>,
}

identity_by_id!(Employee);

impl Employee {
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.days_available.contains(&day)
    }

    /// True when every required skill is held. An empty requirement always matches.
    pub fn has_skills(&self, required: &HashSet<EmployeeSkill>) -> bool {
        self.skills.is_superset(required)
    }
}
