// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the store trait boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KennelError;

/// Storage-assigned identifier of a dog. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DogId(i64);

impl DogId {
    /// Wrap a raw id, rejecting zero and negative values.
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// The raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DogId> for i64 {
    fn from(id: DogId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for DogId {
    type Error = KennelError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| KennelError::validation("id", "must be a positive integer"))
    }
}

impl FromStr for DogId {
    type Err = KennelError;

    /// Parses a path segment. Only plain decimal digits are accepted, so
    /// `+5`, ` 5` and `5.0` are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KennelError::validation("id", "must be a positive integer"));
        }
        let raw: i64 = s
            .parse()
            .map_err(|_| KennelError::validation("id", "out of range"))?;
        Self::try_from(raw)
    }
}

/// A validated write payload: both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
}

impl NewDog {
    /// Build a payload, rejecting blank fields.
    ///
    /// Values are kept as submitted; whitespace only matters for the emptiness check.
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Result<Self, KennelError> {
        let name = name.into();
        let breed = breed.into();
        if name.trim().is_empty() {
            return Err(KennelError::validation("name", "must not be empty"));
        }
        if breed.trim().is_empty() {
            return Err(KennelError::validation("breed", "must not be empty"));
        }
        Ok(Self { name, breed })
    }
}

/// A persisted dog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub breed: String,
}

impl Dog {
    /// Attach a storage-assigned id to a validated payload.
    pub fn from_parts(id: DogId, dog: NewDog) -> Self {
        Self {
            id,
            name: dog.name,
            breed: dog.breed,
        }
    }
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is not operational.
    Unhealthy(String),
}
