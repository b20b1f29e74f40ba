use critter_core::db::migrations::latest_version;
use critter_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

const TABLES: [&str; 9] = [
    "customers",
    "pets",
    "employees",
    "employee_days",
    "employee_skills",
    "schedules",
    "schedule_activities",
    "schedule_pets",
    "schedule_employees",
];

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critter.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO customers (name, phone_number) VALUES ('Ada', '555-0100');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM customers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn foreign_keys_reject_pet_without_customer() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO pets (type, name, customer_id) VALUES ('dog', 'Rex', 42);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn check_constraints_reject_unknown_codes() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO employees (name) VALUES ('Sam');", [])
        .unwrap();
    let employee_id = conn.last_insert_rowid();

    let bad_day = conn.execute(
        "INSERT INTO employee_days (employee_id, day) VALUES (?1, 'funday');",
        [employee_id],
    );
    assert!(bad_day.is_err());

    conn.execute(
        "INSERT INTO customers (name, phone_number) VALUES ('Ada', '555-0100');",
        [],
    )
    .unwrap();
    let bad_type = conn.execute(
        "INSERT INTO pets (type, name, customer_id) VALUES ('dragon', 'Puff', ?1);",
        [conn.last_insert_rowid()],
    );
    assert!(bad_type.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
