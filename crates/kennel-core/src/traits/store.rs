// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for the `dogs` table.

use async_trait::async_trait;

use crate::error::KennelError;
use crate::types::{Dog, DogId, HealthStatus, NewDog};

/// Typed access to the dog records, one parameterized statement per call.
///
/// Implementations never order results and never retry; a failed database
/// call surfaces as [`KennelError::Storage`].
#[async_trait]
pub trait DogStore: Send + Sync + 'static {
    /// Returns the human-readable name of this store.
    fn name(&self) -> &str;

    /// Performs a health check and returns the store's current status.
    async fn health_check(&self) -> Result<HealthStatus, KennelError>;

    /// Inserts a record and returns it with the storage-assigned id.
    async fn create(&self, dog: NewDog) -> Result<Dog, KennelError>;

    /// Deletes a record. Returns whether a row was actually removed.
    async fn delete(&self, id: DogId) -> Result<bool, KennelError>;

    /// Fetches every record in storage order.
    async fn get_all(&self) -> Result<Vec<Dog>, KennelError>;

    /// Fetches a single record.
    async fn get_one(&self, id: DogId) -> Result<Option<Dog>, KennelError>;

    /// Overwrites name and breed. Succeeds even when no row has the id.
    async fn update(&self, dog: &Dog) -> Result<(), KennelError>;
}
