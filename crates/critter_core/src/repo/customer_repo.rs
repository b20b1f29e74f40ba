//! Customer repository contracts and SQLite implementation.
//!
//! # Invariants
//! - A customer's `pet_ids` are read from `pets.customer_id`, the single
//!   stored copy of the ownership link.

use super::{ensure_connection_ready, RepoResult, TableRequirement};
use crate::model::customer::{Customer, NewCustomer};
use crate::model::{CustomerId, PetId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    notes
FROM customers";

const REQUIRED_TABLES: &[TableRequirement] = &[
    (
        "customers",
        &["id", "name", "phone_number", "notes", "updated_at"],
    ),
    ("pets", &["id", "customer_id"]),
];

/// Repository interface for customer persistence.
pub trait CustomerRepository {
    fn create_customer(&self, draft: &NewCustomer) -> RepoResult<Customer>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    /// Loads the owner of a pet, or `None` when the pet id does not resolve.
    fn find_by_pet_id(&self, pet_id: PetId) -> RepoResult<Option<Customer>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, draft: &NewCustomer) -> RepoResult<Customer> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO customers (name, phone_number, notes) VALUES (?1, ?2, ?3);",
            params![
                draft.name.as_str(),
                draft.phone_number.as_str(),
                draft.notes.as_deref()
            ],
        )?;

        Ok(Customer {
            id: self.conn.last_insert_rowid(),
            name: draft.name.clone(),
            phone_number: draft.phone_number.clone(),
            notes: draft.notes.clone(),
            pet_ids: Vec::new(),
        })
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        load_customer(self.conn, id)
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(self.conn, row)?);
        }
        Ok(customers)
    }

    fn find_by_pet_id(&self, pet_id: PetId) -> RepoResult<Option<Customer>> {
        let owner_id: Option<CustomerId> = self
            .conn
            .query_row(
                "SELECT customer_id FROM pets WHERE id = ?1;",
                [pet_id],
                |row| row.get(0),
            )
            .optional()?;

        match owner_id {
            Some(owner_id) => load_customer(self.conn, owner_id),
            None => Ok(None),
        }
    }
}

/// Loads one customer with its owned pet ids.
///
/// Accepts any connection, including an open transaction.
pub(crate) fn load_customer(conn: &Connection, id: CustomerId) -> RepoResult<Option<Customer>> {
    let mut stmt = conn.prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_customer_row(conn, row)?));
    }
    Ok(None)
}

/// Writes the customer's own columns back and bumps `updated_at`.
pub(crate) fn save_customer(conn: &Connection, customer: &Customer) -> RepoResult<()> {
    conn.execute(
        "UPDATE customers
         SET
            name = ?2,
            phone_number = ?3,
            notes = ?4,
            updated_at = (strftime('%s', 'now') * 1000)
         WHERE id = ?1;",
        params![
            customer.id,
            customer.name.as_str(),
            customer.phone_number.as_str(),
            customer.notes.as_deref()
        ],
    )?;
    Ok(())
}

fn parse_customer_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Customer> {
    let id: CustomerId = row.get("id")?;
    Ok(Customer {
        id,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        notes: row.get("notes")?,
        pet_ids: load_pet_ids(conn, id)?,
    })
}

fn load_pet_ids(conn: &Connection, customer_id: CustomerId) -> RepoResult<Vec<PetId>> {
    let mut stmt = conn.prepare("SELECT id FROM pets WHERE customer_id = ?1 ORDER BY id ASC;")?;
    let mut rows = stmt.query([customer_id])?;
    let mut pet_ids = Vec::new();
    while let Some(row) = rows.next()? {
        pet_ids.push(row.get(0)?);
    }
    Ok(pet_ids)
}
