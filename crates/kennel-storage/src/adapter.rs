// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`DogStore`] trait.

use async_trait::async_trait;

use kennel_core::{Dog, DogId, DogStore, HealthStatus, KennelError, NewDog};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed dog store.
///
/// Wraps an already-open [`Database`] and delegates every operation to the
/// typed query module. Construction never touches the database; the caller
/// owns the database lifecycle.
#[derive(Debug, Clone)]
pub struct SqliteDogStore {
    db: Database,
}

impl SqliteDogStore {
    /// Create a store over an open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The wrapped database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Consume the store, returning the database so it can be closed.
    pub fn into_database(self) -> Database {
        self.db
    }
}

#[async_trait]
impl DogStore for SqliteDogStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, KennelError> {
        let result = self
            .db
            .connection()
            .call(|conn| conn.execute_batch("SELECT 1;"))
            .await
            .map_err(map_tr_err);
        Ok(match result {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn create(&self, dog: NewDog) -> Result<Dog, KennelError> {
        queries::dogs::create_dog(&self.db, dog).await
    }

    async fn delete(&self, id: DogId) -> Result<bool, KennelError> {
        queries::dogs::delete_dog(&self.db, id).await
    }

    async fn get_all(&self) -> Result<Vec<Dog>, KennelError> {
        queries::dogs::list_dogs(&self.db).await
    }

    async fn get_one(&self, id: DogId) -> Result<Option<Dog>, KennelError> {
        queries::dogs::get_dog(&self.db, id).await
    }

    async fn update(&self, dog: &Dog) -> Result<(), KennelError> {
        queries::dogs::update_dog(&self.db, dog).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_store() -> (SqliteDogStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");
        let db = Database::open(db_path.to_str().unwrap(), None).await.unwrap();
        (SqliteDogStore::new(db), dir)
    }

    #[tokio::test]
    async fn store_reports_name_and_health() {
        let (store, _dir) = open_store().await;
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.into_database().close().await.unwrap();
    }

    #[tokio::test]
    async fn health_check_reports_closed_connection() {
        let (store, _dir) = open_store().await;
        store.database().clone().close().await.unwrap();
        match store.health_check().await.unwrap() {
            HealthStatus::Unhealthy(_) => {}
            other => panic!("expected Unhealthy after close, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn operations_fail_with_storage_error_after_close() {
        let (store, _dir) = open_store().await;
        store.database().clone().close().await.unwrap();
        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, KennelError::Storage { .. }));
    }

    #[tokio::test]
    async fn full_lifecycle_through_trait_object() {
        let (store, _dir) = open_store().await;
        let store: &dyn DogStore = &store;

        let rex = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);

        let renamed = Dog {
            name: "Rexy".into(),
            ..rex.clone()
        };
        store.update(&renamed).await.unwrap();
        assert_eq!(store.get_one(rex.id).await.unwrap(), Some(renamed));

        assert!(store.delete(rex.id).await.unwrap());
        assert!(store.get_one(rex.id).await.unwrap().is_none());
    }
}
