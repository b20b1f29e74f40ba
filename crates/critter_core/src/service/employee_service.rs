//! Employee use-case service and availability matching.
//!
//! # Responsibility
//! - Create and read employees, replace their weekly availability.
//! - Select employees eligible for a service on a given date.
//!
//! # Invariants
//! - Eligibility is `weekday(date) ∈ days_available && required ⊆ skills`.
//! - Matching is read-only; it never writes to storage.

use crate::error::{CoreError, CoreResult};
use crate::model::employee::{Employee, EmployeeSkill, NewEmployee};
use crate::model::EmployeeId;
use crate::repo::employee_repo::EmployeeRepository;
use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, info};
use std::collections::HashSet;

/// Use-case service wrapper for employee operations.
pub struct EmployeeService<E: EmployeeRepository> {
    employees: E,
}

impl<E: EmployeeRepository> EmployeeService<E> {
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    pub fn create_employee(&self, draft: &NewEmployee) -> CoreResult<Employee> {
        let employee = self.employees.create_employee(draft)?;
        info!(
            "event=employee_create module=service status=ok employee_id={} skills={} days={}",
            employee.id,
            employee.skills.len(),
            employee.days_available.len()
        );
        Ok(employee)
    }

    pub fn get_employee(&self, id: EmployeeId) -> CoreResult<Employee> {
        self.employees
            .get_employee(id)?
            .ok_or_else(|| CoreError::not_found("employee", id))
    }

    /// Replaces the full availability set of one employee.
    pub fn set_employee_availability(
        &self,
        id: EmployeeId,
        days: &HashSet<Weekday>,
    ) -> CoreResult<()> {
        self.employees.set_availability(id, days)?;
        info!(
            "event=employee_availability module=service status=ok employee_id={id} days={}",
            days.len()
        );
        Ok(())
    }

    /// Employees available on `date`'s weekday holding every required skill.
    ///
    /// An empty `required` set matches every employee available that day.
    /// No available employees yields an empty list, not an error.
    pub fn find_eligible_employees(
        &self,
        date: NaiveDate,
        required: &HashSet<EmployeeSkill>,
    ) -> CoreResult<Vec<Employee>> {
        let day = date.weekday();
        let candidates = self.employees.find_available_on(day)?;
        let candidate_count = candidates.len();
        let eligible: Vec<Employee> = candidates
            .into_iter()
            .filter(|employee| is_eligible(employee, day, required))
            .collect();

        debug!(
            "event=employee_match module=service status=ok day={day} required={} candidates={candidate_count} eligible={}",
            required.len(),
            eligible.len()
        );
        Ok(eligible)
    }
}

/// Pure eligibility predicate shared by the matcher and its callers.
pub fn is_eligible(employee: &Employee, day: Weekday, required: &HashSet<EmployeeSkill>) -> bool {
    employee.is_available_on(day) && employee.has_skills(required)
}
