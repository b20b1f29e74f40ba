//! Schedule domain model.
//!
//! A schedule binds a set of pets to a set of employees on one date with an
//! ordered list of activities. There is no status lifecycle.

use super::employee::EmployeeSkill;
use super::{identity_by_id, EmployeeId, PetId, ScheduleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Schedule input after employee/pet ids were resolved against storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub date: NaiveDate,
    pub activities: Vec<EmployeeSkill>,
    pub employee_ids: BTreeSet<EmployeeId>,
    pub pet_ids: BTreeSet<PetId>,
}

/// Persisted schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub date: NaiveDate,
    /// Activities in the order they were requested.
    pub activities: Vec<EmployeeSkill>,
    pub employee_ids: BTreeSet<EmployeeId>,
    pub pet_ids: BTreeSet<PetId>,
}

identity_by_id!(Schedule);

impl Schedule {
    /// Valid but useless: nobody to care for, or nobody to do the caring.
    pub fn is_empty(&self) -> bool {
        self.pet_ids.is_empty() || self.employee_ids.is_empty()
    }

    pub fn includes_pet(&self, pet_id: PetId) -> bool {
        self.pet_ids.contains(&pet_id)
    }

    pub fn includes_employee(&self, employee_id: EmployeeId) -> bool {
        self.employee_ids.contains(&employee_id)
    }
}
