// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store for deterministic handler tests.
//!
//! `MockDogStore` implements `DogStore` over a `BTreeMap` and counts every
//! trait call, so tests can assert that rejected requests never reached
//! storage. [`MockDogStore::failing`] builds a store whose every operation
//! errors.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use kennel_core::{Dog, DogId, DogStore, HealthStatus, KennelError, NewDog};

/// A mock record store for testing.
#[derive(Debug)]
pub struct MockDogStore {
    dogs: Mutex<BTreeMap<DogId, Dog>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
    fail: bool,
}

impl MockDogStore {
    /// Create an empty, working store.
    pub fn new() -> Self {
        Self {
            dogs: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Create a store whose every operation fails with a storage error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of `DogStore` operations invoked so far (health checks excluded).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<DogId, Dog>> {
        self.dogs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self) -> Result<(), KennelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(KennelError::Storage {
                source: "mock store configured to fail".into(),
            });
        }
        Ok(())
    }
}

impl Default for MockDogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DogStore for MockDogStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<HealthStatus, KennelError> {
        if self.fail {
            return Ok(HealthStatus::Unhealthy("mock store configured to fail".into()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn create(&self, dog: NewDog) -> Result<Dog, KennelError> {
        self.enter()?;
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = DogId::try_from(raw)?;
        let dog = Dog::from_parts(id, dog);
        self.lock().insert(id, dog.clone());
        Ok(dog)
    }

    async fn delete(&self, id: DogId) -> Result<bool, KennelError> {
        self.enter()?;
        Ok(self.lock().remove(&id).is_some())
    }

    async fn get_all(&self) -> Result<Vec<Dog>, KennelError> {
        self.enter()?;
        Ok(self.lock().values().cloned().collect())
    }

    async fn get_one(&self, id: DogId) -> Result<Option<Dog>, KennelError> {
        self.enter()?;
        Ok(self.lock().get(&id).cloned())
    }

    async fn update(&self, dog: &Dog) -> Result<(), KennelError> {
        self.enter()?;
        if let Some(existing) = self.lock().get_mut(&dog.id) {
            existing.clone_from(dog);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MockDogStore::new();
        let a = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        let b = store.create(NewDog::new("Max", "Pug").unwrap()).await.unwrap();
        assert!(a.id < b.id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_a_no_op() {
        let store = MockDogStore::new();
        let ghost = Dog {
            id: DogId::new(9).unwrap(),
            name: "Ghost".into(),
            breed: "None".into(),
        };
        store.update(&ghost).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failing_store_errors_and_reports_unhealthy() {
        let store = MockDogStore::failing();
        assert!(store.get_all().await.is_err());
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }
}
