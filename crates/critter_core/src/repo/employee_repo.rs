//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist employees with their skill and weekday sets.
//! - Provide the weekday-indexed candidate lookup used by availability matching.
//!
//! # Invariants
//! - `employee_days` and `employee_skills` rows are replaced as whole sets,
//!   inside the same transaction as the owning employee write.

use super::{
    ensure_connection_ready, id_batches, parse_skill, parse_weekday, skill_to_db,
    weekday_to_db, RepoError, RepoResult, TableRequirement,
};
use crate::model::employee::{Employee, EmployeeSkill, NewEmployee};
use crate::model::EmployeeId;
use chrono::Weekday;
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};
use std::collections::HashSet;

const REQUIRED_TABLES: &[TableRequirement] = &[
    ("employees", &["id", "name", "updated_at"]),
    ("employee_days", &["employee_id", "day"]),
    ("employee_skills", &["employee_id", "skill"]),
];

/// Repository interface for employee persistence.
pub trait EmployeeRepository {
    fn create_employee(&self, draft: &NewEmployee) -> RepoResult<Employee>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Batch lookup; ids that do not resolve are absent from the result.
    fn find_all_by_ids(&self, ids: &[EmployeeId]) -> RepoResult<Vec<Employee>>;
    /// Employees whose availability contains `day`, in id order.
    fn find_available_on(&self, day: Weekday) -> RepoResult<Vec<Employee>>;
    /// Replaces the availability set. `NotFound` when the employee is absent.
    fn set_availability(&self, id: EmployeeId, days: &HashSet<Weekday>) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    fn load_many(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            let id: EmployeeId = row.get("id")?;
            employees.push(Employee {
                id,
                name: row.get("name")?,
                skills: load_skills(self.conn, id)?,
                days_available: load_days(self.conn, id)?,
            });
        }
        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, draft: &NewEmployee) -> RepoResult<Employee> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO employees (name) VALUES (?1);",
            [draft.name.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        insert_skills(&tx, id, &draft.skills)?;
        insert_days(&tx, id, &draft.days_available)?;
        tx.commit()?;

        Ok(Employee {
            id,
            name: draft.name.clone(),
            skills: draft.skills.clone(),
            days_available: draft.days_available.clone(),
        })
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut found = self.load_many("SELECT id, name FROM employees WHERE id = ?1;", [id])?;
        Ok(found.pop())
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.load_many("SELECT id, name FROM employees ORDER BY id ASC;", [])
    }

    fn find_all_by_ids(&self, ids: &[EmployeeId]) -> RepoResult<Vec<Employee>> {
        // Batches are ascending and disjoint, so concatenation keeps id order.
        let mut employees = Vec::new();
        for batch in id_batches(ids) {
            employees.extend(self.load_many(
                &format!(
                    "SELECT id, name FROM employees WHERE id IN ({}) ORDER BY id ASC;",
                    batch.placeholders
                ),
                params_from_iter(batch.values),
            )?);
        }
        Ok(employees)
    }

    fn find_available_on(&self, day: Weekday) -> RepoResult<Vec<Employee>> {
        self.load_many(
            "SELECT e.id AS id, e.name AS name
             FROM employees e
             INNER JOIN employee_days d ON d.employee_id = e.id
             WHERE d.day = ?1
             ORDER BY e.id ASC;",
            [weekday_to_db(day)],
        )
    }

    fn set_availability(&self, id: EmployeeId, days: &HashSet<Weekday>) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE employees
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "employee",
                id,
            });
        }

        tx.execute("DELETE FROM employee_days WHERE employee_id = ?1;", [id])?;
        insert_days(&tx, id, days)?;
        tx.commit()?;
        Ok(())
    }
}

fn insert_skills(
    tx: &Transaction<'_>,
    id: EmployeeId,
    skills: &HashSet<EmployeeSkill>,
) -> RepoResult<()> {
    for skill in skills {
        tx.execute(
            "INSERT INTO employee_skills (employee_id, skill) VALUES (?1, ?2);",
            params![id, skill_to_db(*skill)],
        )?;
    }
    Ok(())
}

fn insert_days(tx: &Transaction<'_>, id: EmployeeId, days: &HashSet<Weekday>) -> RepoResult<()> {
    for day in days {
        tx.execute(
            "INSERT INTO employee_days (employee_id, day) VALUES (?1, ?2);",
            params![id, weekday_to_db(*day)],
        )?;
    }
    Ok(())
}

fn load_skills(conn: &Connection, id: EmployeeId) -> RepoResult<HashSet<EmployeeSkill>> {
    let mut stmt = conn.prepare("SELECT skill FROM employee_skills WHERE employee_id = ?1;")?;
    let mut rows = stmt.query([id])?;
    let mut skills = HashSet::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        skills.insert(parse_skill(&value, "employee_skills.skill")?);
    }
    Ok(skills)
}

fn load_days(conn: &Connection, id: EmployeeId) -> RepoResult<HashSet<Weekday>> {
    let mut stmt = conn.prepare("SELECT day FROM employee_days WHERE employee_id = ?1;")?;
    let mut rows = stmt.query([id])?;
    let mut days = HashSet::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        days.insert(parse_weekday(&value)?);
    }
    Ok(days)
}
