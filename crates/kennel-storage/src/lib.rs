// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL persistence layer for kennel.
//!
//! Provides an explicitly opened database handle with embedded migrations,
//! a single-connection concurrency model via `tokio-rusqlite`, and typed
//! queries for the `dogs` table. Remote libSQL endpoints are served by
//! [`LibsqlDogStore`].

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod remote;

pub use adapter::SqliteDogStore;
pub use database::Database;
pub use remote::{LibsqlDogStore, is_remote_url};
