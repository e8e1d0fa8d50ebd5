// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote libSQL implementation of the [`DogStore`] trait.
//!
//! Talks to a libSQL server (sqld, Turso) over HTTP with the configured
//! URL and bearer token. Statements are the same parameterized SQL the
//! local store runs.

use async_trait::async_trait;
use kennel_core::{Dog, DogId, DogStore, HealthStatus, KennelError, NewDog};
use libsql::{Connection, Row, params};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

/// Schemes served by [`LibsqlDogStore`] rather than the local database.
pub const REMOTE_SCHEMES: &[&str] = &["libsql", "https", "http", "wss", "ws"];

const CREATE_DOGS: &str = "CREATE TABLE IF NOT EXISTS dogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0),
    breed TEXT NOT NULL CHECK (length(breed) > 0)
)";

/// Whether `url` names a remote libSQL endpoint.
pub fn is_remote_url(url: &str) -> bool {
    url.split_once("://")
        .is_some_and(|(scheme, _)| REMOTE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()))
}

fn map_libsql_err(e: libsql::Error) -> KennelError {
    KennelError::Storage {
        source: Box::new(e),
    }
}

fn dog_from_row(row: &Row) -> Result<Dog, KennelError> {
    let raw: i64 = row.get(0).map_err(map_libsql_err)?;
    let id = DogId::new(raw)
        .ok_or_else(|| KennelError::Internal(format!("remote returned invalid id {raw}")))?;
    Ok(Dog {
        id,
        name: row.get(1).map_err(map_libsql_err)?,
        breed: row.get(2).map_err(map_libsql_err)?,
    })
}

/// Dog store backed by a remote libSQL database.
#[derive(Clone)]
pub struct LibsqlDogStore {
    conn: Connection,
    url: String,
}

impl std::fmt::Debug for LibsqlDogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibsqlDogStore")
            .field("url", &self.url)
            .finish()
    }
}

impl LibsqlDogStore {
    /// Connect to `url` and make sure the `dogs` table exists.
    pub async fn connect(url: &str, auth_token: Option<&SecretString>) -> Result<Self, KennelError> {
        if !is_remote_url(url) {
            return Err(KennelError::Config(format!(
                "`{url}` is not a remote libsql url"
            )));
        }
        let token = auth_token
            .map(|t| t.expose_secret().to_string())
            .unwrap_or_default();
        let db = libsql::Builder::new_remote(url.to_string(), token)
            .build()
            .await
            .map_err(map_libsql_err)?;
        let conn = db.connect().map_err(map_libsql_err)?;
        conn.execute(CREATE_DOGS, ()).await.map_err(map_libsql_err)?;

        info!(url = %url, "remote database connected");
        Ok(Self {
            conn,
            url: url.to_string(),
        })
    }

    async fn query_dogs(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Dog>, KennelError> {
        let mut rows = self.conn.query(sql, params).await.map_err(map_libsql_err)?;
        let mut dogs = Vec::new();
        while let Some(row) = rows.next().await.map_err(map_libsql_err)? {
            dogs.push(dog_from_row(&row)?);
        }
        Ok(dogs)
    }
}

#[async_trait]
impl DogStore for LibsqlDogStore {
    fn name(&self) -> &str {
        "libsql"
    }

    async fn health_check(&self) -> Result<HealthStatus, KennelError> {
        Ok(match self.conn.query("SELECT 1", ()).await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn create(&self, dog: NewDog) -> Result<Dog, KennelError> {
        let mut rows = self
            .conn
            .query(
                "INSERT INTO dogs (name, breed) VALUES (?1, ?2) RETURNING id",
                params![dog.name.clone(), dog.breed.clone()],
            )
            .await
            .map_err(map_libsql_err)?;
        let row = rows
            .next()
            .await
            .map_err(map_libsql_err)?
            .ok_or_else(|| KennelError::Internal("insert returned no id".into()))?;
        let raw: i64 = row.get(0).map_err(map_libsql_err)?;
        let id = DogId::new(raw)
            .ok_or_else(|| KennelError::Internal(format!("remote assigned invalid id {raw}")))?;
        debug!(id = %id, "dog created");
        Ok(Dog::from_parts(id, dog))
    }

    async fn delete(&self, id: DogId) -> Result<bool, KennelError> {
        let rows = self
            .conn
            .execute("DELETE FROM dogs WHERE id = ?1", params![id.get()])
            .await
            .map_err(map_libsql_err)?;
        debug!(id = %id, rows, "dog delete executed");
        Ok(rows > 0)
    }

    async fn get_all(&self) -> Result<Vec<Dog>, KennelError> {
        self.query_dogs("SELECT id, name, breed FROM dogs", ()).await
    }

    async fn get_one(&self, id: DogId) -> Result<Option<Dog>, KennelError> {
        let dogs = self
            .query_dogs(
                "SELECT id, name, breed FROM dogs WHERE id = ?1",
                params![id.get()],
            )
            .await?;
        Ok(dogs.into_iter().next())
    }

    async fn update(&self, dog: &Dog) -> Result<(), KennelError> {
        let rows = self
            .conn
            .execute(
                "UPDATE dogs SET name = ?1, breed = ?2 WHERE id = ?3",
                params![dog.name.clone(), dog.breed.clone(), dog.id.get()],
            )
            .await
            .map_err(map_libsql_err)?;
        debug!(id = %dog.id, rows, "dog update executed");
        Ok(())
    }
}
