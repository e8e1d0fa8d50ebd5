// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for kennel.
//!
//! Serves htmx fragments for listing, creating, editing and deleting dogs,
//! tracks the shared edit selection, and falls back to static assets for
//! everything else.

pub mod collate;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod selection;
pub mod server;

pub use error::ApiError;
pub use render::{Fragment, FormView};
pub use selection::{Selection, SelectionState};
pub use server::{AppState, GatewayConfig, build_router, start_server};
