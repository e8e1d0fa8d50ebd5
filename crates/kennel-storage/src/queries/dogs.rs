// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dog CRUD operations. One parameterized statement per function.

use kennel_core::{Dog, DogId, KennelError, NewDog};
use rusqlite::{Row, params};
use tracing::debug;

use crate::database::{Database, map_tr_err};

/// Map a `SELECT id, name, breed` row into a [`Dog`].
fn dog_from_row(row: &Row<'_>) -> rusqlite::Result<Dog> {
    let raw: i64 = row.get(0)?;
    let id = DogId::new(raw).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(0, raw)
    })?;
    Ok(Dog {
        id,
        name: row.get(1)?,
        breed: row.get(2)?,
    })
}

/// Insert a dog and return it with the storage-assigned id.
pub async fn create_dog(db: &Database, dog: NewDog) -> Result<Dog, KennelError> {
    let name = dog.name.clone();
    let breed = dog.breed.clone();
    let raw_id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO dogs (name, breed) VALUES (?1, ?2)",
                params![name, breed],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    let id = DogId::new(raw_id)
        .ok_or_else(|| KennelError::Internal(format!("storage assigned invalid id {raw_id}")))?;
    debug!(id = %id, "dog created");
    Ok(Dog::from_parts(id, dog))
}

/// Delete a dog. Returns whether a row was removed.
pub async fn delete_dog(db: &Database, id: DogId) -> Result<bool, KennelError> {
    let raw = id.get();
    let rows = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM dogs WHERE id = ?1", params![raw]))
        .await
        .map_err(map_tr_err)?;
    debug!(id = %id, rows, "dog delete executed");
    Ok(rows > 0)
}

/// Fetch every dog in storage order.
pub async fn list_dogs(db: &Database) -> Result<Vec<Dog>, KennelError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, breed FROM dogs")?;
            let rows = stmt.query_map([], dog_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch one dog by id.
pub async fn get_dog(db: &Database, id: DogId) -> Result<Option<Dog>, KennelError> {
    let raw = id.get();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT id, name, breed FROM dogs WHERE id = ?1")?;
            match stmt.query_row(params![raw], dog_from_row) {
                Ok(dog) => Ok(Some(dog)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite name and breed. No existence check: a missing id updates zero rows.
pub async fn update_dog(db: &Database, dog: &Dog) -> Result<(), KennelError> {
    let raw = dog.id.get();
    let name = dog.name.clone();
    let breed = dog.breed.clone();
    let rows = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE dogs SET name = ?1, breed = ?2 WHERE id = ?3",
                params![name, breed, raw],
            )
        })
        .await
        .map_err(map_tr_err)?;
    debug!(id = %dog.id, rows, "dog update executed");
    Ok(())
}
