//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-aggregate data access contracts (find-by-id, find-all,
//!   batch find-by-ids, membership finds, atomic saves).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Multi-row writes commit in one transaction or not at all.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::EmployeeSkill;
use crate::model::ValidationError;
use chrono::Weekday;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::BTreeSet;
use thiserror::Error;

pub mod customer_repo;
pub mod employee_repo;
pub mod pet_repo;
pub mod schedule_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table name plus the columns a repository reads or writes.
pub(crate) type TableRequirement = (&'static str, &'static [&'static str]);

/// Rejects connections that are not migrated to the schema this binary expects.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    requirements: &[TableRequirement],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in requirements {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Upper bound of bind variables per `IN (...)` batch, well below
/// `SQLITE_MAX_VARIABLE_NUMBER` on every SQLite build.
pub(crate) const MAX_IDS_PER_QUERY: usize = 500;

/// One `IN (...)` batch: `?, ?, ?` placeholders plus their bind values.
pub(crate) struct IdBatch {
    pub(crate) placeholders: String,
    pub(crate) values: Vec<Value>,
}

/// Deduplicates `ids` and splits them into ascending batches of at most
/// [`MAX_IDS_PER_QUERY`] values. Empty input yields no batches.
pub(crate) fn id_batches(ids: &[i64]) -> Vec<IdBatch> {
    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    let unique: Vec<i64> = unique.into_iter().collect();
    unique
        .chunks(MAX_IDS_PER_QUERY)
        .map(|chunk| IdBatch {
            placeholders: vec!["?"; chunk.len()].join(", "),
            values: chunk.iter().copied().map(Value::Integer).collect(),
        })
        .collect()
}

pub(crate) fn skill_to_db(skill: EmployeeSkill) -> &'static str {
    match skill {
        EmployeeSkill::Petting => "petting",
        EmployeeSkill::Walking => "walking",
        EmployeeSkill::Feeding => "feeding",
        EmployeeSkill::Medicating => "medicating",
        EmployeeSkill::Shaving => "shaving",
        EmployeeSkill::Bathing => "bathing",
    }
}

pub(crate) fn parse_skill(value: &str, column: &str) -> RepoResult<EmployeeSkill> {
    match value {
        "petting" => Ok(EmployeeSkill::Petting),
        "walking" => Ok(EmployeeSkill::Walking),
        "feeding" => Ok(EmployeeSkill::Feeding),
        "medicating" => Ok(EmployeeSkill::Medicating),
        "shaving" => Ok(EmployeeSkill::Shaving),
        "bathing" => Ok(EmployeeSkill::Bathing),
        other => Err(RepoError::InvalidData(format!(
            "invalid skill `{other}` in {column}"
        ))),
    }
}

pub(crate) fn weekday_to_db(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

pub(crate) fn parse_weekday(value: &str) -> RepoResult<Weekday> {
    match value {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        other => Err(RepoError::InvalidData(format!(
            "invalid weekday `{other}` in employee_days.day"
        ))),
    }
}
