// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for kennel.
//!
//! This crate provides the domain types, the error taxonomy, and the
//! [`DogStore`] trait that the storage backend implements and the HTTP
//! gateway consumes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KennelError;
pub use traits::DogStore;
pub use types::{Dog, DogId, HealthStatus, NewDog};
