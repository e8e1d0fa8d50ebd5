// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the storage seam.
//!
//! Traits use `#[async_trait]` for dynamic dispatch compatibility, so the
//! gateway can hold an `Arc<dyn DogStore>`.

pub mod store;

pub use store::DogStore;
