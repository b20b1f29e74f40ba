//! Schedule repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist schedules with their activity list and pet/employee link sets.
//! - Provide membership finds by pet, by employee and by a set of pets.
//!
//! # Invariants
//! - Activities keep request order through `schedule_activities.position`.
//! - A schedule and all of its link rows are written in one transaction.
//! - Membership finds return each schedule at most once, in id order.

use super::{
    ensure_connection_ready, id_batches, parse_skill, skill_to_db, RepoResult, TableRequirement,
};
use crate::model::employee::EmployeeSkill;
use crate::model::schedule::{NewSchedule, Schedule};
use crate::model::{EmployeeId, PetId, ScheduleId};
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};
use std::collections::{BTreeMap, BTreeSet};

const REQUIRED_TABLES: &[TableRequirement] = &[
    ("schedules", &["id", "date"]),
    ("schedule_activities", &["schedule_id", "position", "activity"]),
    ("schedule_pets", &["schedule_id", "pet_id"]),
    ("schedule_employees", &["schedule_id", "employee_id"]),
];

/// Repository interface for schedule persistence.
pub trait ScheduleRepository {
    /// Persists a schedule whose pet/employee ids were already resolved.
    fn create_schedule(&self, draft: &NewSchedule) -> RepoResult<Schedule>;
    fn list_schedules(&self) -> RepoResult<Vec<Schedule>>;
    fn list_by_pet(&self, pet_id: PetId) -> RepoResult<Vec<Schedule>>;
    fn list_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Schedule>>;
    /// Schedules whose pet set intersects `pet_ids`.
    fn list_by_pets(&self, pet_ids: &[PetId]) -> RepoResult<Vec<Schedule>>;
}

/// SQLite-backed schedule repository.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    fn load_many(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Schedule>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut schedules = Vec::new();
        while let Some(row) = rows.next()? {
            let id: ScheduleId = row.get("id")?;
            schedules.push(Schedule {
                id,
                date: row.get("date")?,
                activities: load_activities(self.conn, id)?,
                employee_ids: load_link_ids(
                    self.conn,
                    "SELECT employee_id FROM schedule_employees WHERE schedule_id = ?1;",
                    id,
                )?,
                pet_ids: load_link_ids(
                    self.conn,
                    "SELECT pet_id FROM schedule_pets WHERE schedule_id = ?1;",
                    id,
                )?,
            });
        }
        Ok(schedules)
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn create_schedule(&self, draft: &NewSchedule) -> RepoResult<Schedule> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute("INSERT INTO schedules (date) VALUES (?1);", [draft.date])?;
        let id = tx.last_insert_rowid();

        for (position, activity) in draft.activities.iter().enumerate() {
            tx.execute(
                "INSERT INTO schedule_activities (schedule_id, position, activity)
                 VALUES (?1, ?2, ?3);",
                params![id, position as i64, skill_to_db(*activity)],
            )?;
        }
        for pet_id in &draft.pet_ids {
            tx.execute(
                "INSERT INTO schedule_pets (schedule_id, pet_id) VALUES (?1, ?2);",
                params![id, pet_id],
            )?;
        }
        for employee_id in &draft.employee_ids {
            tx.execute(
                "INSERT INTO schedule_employees (schedule_id, employee_id) VALUES (?1, ?2);",
                params![id, employee_id],
            )?;
        }
        tx.commit()?;

        Ok(Schedule {
            id,
            date: draft.date,
            activities: draft.activities.clone(),
            employee_ids: draft.employee_ids.clone(),
            pet_ids: draft.pet_ids.clone(),
        })
    }

    fn list_schedules(&self) -> RepoResult<Vec<Schedule>> {
        self.load_many("SELECT id, date FROM schedules ORDER BY id ASC;", [])
    }

    fn list_by_pet(&self, pet_id: PetId) -> RepoResult<Vec<Schedule>> {
        self.list_by_pets(&[pet_id])
    }

    fn list_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Schedule>> {
        self.load_many(
            "SELECT s.id AS id, s.date AS date
             FROM schedules s
             WHERE EXISTS (
                SELECT 1
                FROM schedule_employees se
                WHERE se.schedule_id = s.id
                  AND se.employee_id = ?1
             )
             ORDER BY s.id ASC;",
            [employee_id],
        )
    }

    fn list_by_pets(&self, pet_ids: &[PetId]) -> RepoResult<Vec<Schedule>> {
        // A schedule can match in several batches; key by id to keep one copy.
        let mut found = BTreeMap::new();
        for batch in id_batches(pet_ids) {
            let schedules = self.load_many(
                &format!(
                    "SELECT s.id AS id, s.date AS date
                     FROM schedules s
                     WHERE EXISTS (
                        SELECT 1
                        FROM schedule_pets sp
                        WHERE sp.schedule_id = s.id
                          AND sp.pet_id IN ({})
                     )
                     ORDER BY s.id ASC;",
                    batch.placeholders
                ),
                params_from_iter(batch.values),
            )?;
            for schedule in schedules {
                found.entry(schedule.id).or_insert(schedule);
            }
        }
        Ok(found.into_values().collect())
    }
}

fn load_activities(conn: &Connection, id: ScheduleId) -> RepoResult<Vec<EmployeeSkill>> {
    let mut stmt = conn.prepare(
        "SELECT activity
         FROM schedule_activities
         WHERE schedule_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([id])?;
    let mut activities = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        activities.push(parse_skill(&value, "schedule_activities.activity")?);
    }
    Ok(activities)
}

fn load_link_ids(conn: &Connection, sql: &str, id: ScheduleId) -> RepoResult<BTreeSet<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([id])?;
    let mut ids = BTreeSet::new();
    while let Some(row) = rows.next()? {
        ids.insert(row.get(0)?);
    }
    Ok(ids)
}
