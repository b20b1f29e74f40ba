//! Schedule use-case service.
//!
//! # Responsibility
//! - Resolve employee/pet id lists and persist the resulting schedule.
//! - Answer schedule lookups by pet, by employee and by customer.
//!
//! # Invariants
//! - Ids that do not resolve at creation are dropped, never an error.
//! - Lookups fail with `NotFound` only when the root id is missing; an
//!   existing root with no schedules yields an empty list.

use crate::error::{CoreError, CoreResult};
use crate::model::employee::EmployeeSkill;
use crate::model::schedule::{NewSchedule, Schedule};
use crate::model::{CustomerId, EmployeeId, PetId};
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::pet_repo::PetRepository;
use crate::repo::schedule_repo::ScheduleRepository;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Request model for creating a schedule from raw ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateScheduleRequest {
    pub date: NaiveDate,
    pub activities: Vec<EmployeeSkill>,
    pub employee_ids: Vec<EmployeeId>,
    pub pet_ids: Vec<PetId>,
}

/// Schedule service over the four aggregate repositories it reads.
pub struct ScheduleService<S, E, P, C>
where
    S: ScheduleRepository,
    E: EmployeeRepository,
    P: PetRepository,
    C: CustomerRepository,
{
    schedules: S,
    employees: E,
    pets: P,
    customers: C,
}

impl<S, E, P, C> ScheduleService<S, E, P, C>
where
    S: ScheduleRepository,
    E: EmployeeRepository,
    P: PetRepository,
    C: CustomerRepository,
{
    pub fn new(schedules: S, employees: E, pets: P, customers: C) -> Self {
        Self {
            schedules,
            employees,
            pets,
            customers,
        }
    }

    /// Resolves ids through batch lookups and persists the schedule.
    ///
    /// Unknown employee or pet ids are silently left out of the stored sets;
    /// the number dropped is logged at `warn`.
    pub fn create_schedule(&self, request: &CreateScheduleRequest) -> CoreResult<Schedule> {
        let employee_ids: BTreeSet<EmployeeId> = self
            .employees
            .find_all_by_ids(&request.employee_ids)?
            .into_iter()
            .map(|employee| employee.id)
            .collect();
        let pet_ids: BTreeSet<PetId> = self
            .pets
            .find_all_by_ids(&request.pet_ids)?
            .into_iter()
            .map(|pet| pet.id)
            .collect();

        let dropped_employees = count_unresolved(&request.employee_ids, &employee_ids);
        let dropped_pets = count_unresolved(&request.pet_ids, &pet_ids);
        if dropped_employees > 0 || dropped_pets > 0 {
            warn!(
                "event=schedule_create module=service status=partial dropped_employee_ids={dropped_employees} dropped_pet_ids={dropped_pets}"
            );
        }

        let schedule = self.schedules.create_schedule(&NewSchedule {
            date: request.date,
            activities: request.activities.clone(),
            employee_ids,
            pet_ids,
        })?;
        if schedule.is_empty() {
            warn!(
                "event=schedule_create module=service status=empty schedule_id={} employees={} pets={}",
                schedule.id,
                schedule.employee_ids.len(),
                schedule.pet_ids.len()
            );
        }
        info!(
            "event=schedule_create module=service status=ok schedule_id={} employees={} pets={} activities={}",
            schedule.id,
            schedule.employee_ids.len(),
            schedule.pet_ids.len(),
            schedule.activities.len()
        );
        Ok(schedule)
    }

    pub fn list_schedules(&self) -> CoreResult<Vec<Schedule>> {
        Ok(self.schedules.list_schedules()?)
    }

    pub fn schedules_for_pet(&self, pet_id: PetId) -> CoreResult<Vec<Schedule>> {
        let pet = self
            .pets
            .get_pet(pet_id)?
            .ok_or_else(|| CoreError::not_found("pet", pet_id))?;
        Ok(self.schedules.list_by_pet(pet.id)?)
    }

    pub fn schedules_for_employee(&self, employee_id: EmployeeId) -> CoreResult<Vec<Schedule>> {
        let employee = self
            .employees
            .get_employee(employee_id)?
            .ok_or_else(|| CoreError::not_found("employee", employee_id))?;
        Ok(self.schedules.list_by_employee(employee.id)?)
    }

    /// Schedules whose pet set intersects the customer's pets.
    pub fn schedules_for_customer(&self, customer_id: CustomerId) -> CoreResult<Vec<Schedule>> {
        let customer = self
            .customers
            .get_customer(customer_id)?
            .ok_or_else(|| CoreError::not_found("customer", customer_id))?;
        debug!(
            "event=schedules_for_customer module=service status=start customer_id={} pets={}",
            customer.id,
            customer.pet_ids.len()
        );
        Ok(self.schedules.list_by_pets(&customer.pet_ids)?)
    }
}

fn count_unresolved(requested: &[i64], resolved: &BTreeSet<i64>) -> usize {
    requested
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|id| !resolved.contains(*id))
        .count()
}
