// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for kennel.

use thiserror::Error;

/// The primary error type shared by the store, the gateway, and the binary.
#[derive(Debug, Error)]
pub enum KennelError {
    /// Configuration errors (missing database URL, unreadable file, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request input did not have the required shape.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending input (`id`, `name`, `breed`, `body`).
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// The addressed record does not exist.
    #[error("dog {id} not found")]
    NotFound { id: i64 },

    /// Database client errors (connection failure, query failure, migration failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KennelError {
    /// Shorthand for a [`KennelError::Validation`] on the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
