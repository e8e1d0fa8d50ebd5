// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for kennel integration tests.
//!
//! Provides a mock store and a full-stack harness for fast, deterministic
//! tests without a running server.
//!
//! # Components
//!
//! - [`MockDogStore`] - In-memory store with call counting and a failing mode
//! - [`TestHarness`] - Router over a real temp SQLite database

pub mod harness;
pub mod mock_store;

pub use harness::{TestHarness, TestResponse};
pub use mock_store::MockDogStore;
