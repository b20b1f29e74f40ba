//! Pet repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist pets and own the customer attach write path (`attach_pet`).
//!
//! # Invariants
//! - A pet row is only ever inserted together with the owner update, in one
//!   `IMMEDIATE` transaction. A missing owner rolls back both.

use super::customer_repo::{load_customer, save_customer};
use super::{ensure_connection_ready, id_batches, RepoError, RepoResult, TableRequirement};
use crate::model::pet::{NewPet, Pet, PetType};
use crate::model::{CustomerId, PetId};
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const PET_SELECT_SQL: &str = "SELECT
    id,
    type,
    name,
    customer_id,
    birth_date,
    notes
FROM pets";

const REQUIRED_TABLES: &[TableRequirement] = &[
    (
        "pets",
        &["id", "type", "name", "customer_id", "birth_date", "notes"],
    ),
    (
        "customers",
        &["id", "name", "phone_number", "notes", "updated_at"],
    ),
];

/// Repository interface for pet persistence.
pub trait PetRepository {
    /// Inserts the pet and appends it to its owner in one transaction.
    ///
    /// Fails with `RepoError::NotFound` for the customer when `owner_id`
    /// does not resolve; nothing is written in that case.
    fn attach_pet(&self, draft: &NewPet) -> RepoResult<Pet>;
    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>>;
    fn list_pets(&self) -> RepoResult<Vec<Pet>>;
    fn list_pets_by_owner(&self, owner_id: CustomerId) -> RepoResult<Vec<Pet>>;
    /// Batch lookup; ids that do not resolve are absent from the result.
    fn find_all_by_ids(&self, ids: &[PetId]) -> RepoResult<Vec<Pet>>;
}

/// SQLite-backed pet repository.
pub struct SqlitePetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl PetRepository for SqlitePetRepository<'_> {
    fn attach_pet(&self, draft: &NewPet) -> RepoResult<Pet> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut owner = load_customer(&tx, draft.owner_id)?.ok_or(RepoError::NotFound {
            entity: "customer",
            id: draft.owner_id,
        })?;

        tx.execute(
            "INSERT INTO pets (type, name, customer_id, birth_date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                pet_type_to_db(draft.kind),
                draft.name.as_str(),
                owner.id,
                draft.birth_date,
                draft.notes.as_deref(),
            ],
        )?;
        let pet_id = tx.last_insert_rowid();

        owner.attach_pet(pet_id);
        save_customer(&tx, &owner)?;
        tx.commit()?;

        Ok(Pet {
            id: pet_id,
            kind: draft.kind,
            name: draft.name.clone(),
            owner_id: owner.id,
            birth_date: draft.birth_date,
            notes: draft.notes.clone(),
        })
    }

    fn get_pet(&self, id: PetId) -> RepoResult<Option<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pet_row(row)?));
        }
        Ok(None)
    }

    fn list_pets(&self) -> RepoResult<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_pets(&mut rows)
    }

    fn list_pets_by_owner(&self, owner_id: CustomerId) -> RepoResult<Vec<Pet>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PET_SELECT_SQL} WHERE customer_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id])?;
        collect_pets(&mut rows)
    }

    fn find_all_by_ids(&self, ids: &[PetId]) -> RepoResult<Vec<Pet>> {
        let mut pets = Vec::new();
        for batch in id_batches(ids) {
            let mut stmt = self.conn.prepare(&format!(
                "{PET_SELECT_SQL} WHERE id IN ({}) ORDER BY id ASC;",
                batch.placeholders
            ))?;
            let mut rows = stmt.query(params_from_iter(batch.values))?;
            pets.extend(collect_pets(&mut rows)?);
        }
        Ok(pets)
    }
}

fn collect_pets(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Pet>> {
    let mut pets = Vec::new();
    while let Some(row) = rows.next()? {
        pets.push(parse_pet_row(row)?);
    }
    Ok(pets)
}

fn parse_pet_row(row: &Row<'_>) -> RepoResult<Pet> {
    let type_text: String = row.get("type")?;
    let kind = parse_pet_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid pet type `{type_text}` in pets.type"))
    })?;

    Ok(Pet {
        id: row.get("id")?,
        kind,
        name: row.get("name")?,
        owner_id: row.get("customer_id")?,
        birth_date: row.get("birth_date")?,
        notes: row.get("notes")?,
    })
}

fn pet_type_to_db(kind: PetType) -> &'static str {
    match kind {
        PetType::Cat => "cat",
        PetType::Dog => "dog",
        PetType::Lizard => "lizard",
        PetType::Bird => "bird",
        PetType::Fish => "fish",
        PetType::Snake => "snake",
        PetType::Other => "other",
    }
}

fn parse_pet_type(value: &str) -> Option<PetType> {
    match value {
        "cat" => Some(PetType::Cat),
        "dog" => Some(PetType::Dog),
        "lizard" => Some(PetType::Lizard),
        "bird" => Some(PetType::Bird),
        "fish" => Some(PetType::Fish),
        "snake" => Some(PetType::Snake),
        "other" => Some(PetType::Other),
        _ => None,
    }
}
