// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: keying, PRAGMA setup, migrations, lifecycle.
//!
//! A [`Database`] is constructed explicitly at startup and closed explicitly
//! at shutdown. All statements are serialized through tokio-rusqlite's single
//! background thread; clones share that one connection.

use kennel_core::KennelError;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::migrations;

/// Convert a tokio-rusqlite error into [`KennelError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> KennelError {
    KennelError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single database connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
    url: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("url", &self.url).finish()
    }
}

impl Database {
    /// Open the database at `url`, key it with `auth_token` when given, and
    /// run pending migrations.
    ///
    /// `url` is a file path, a `file:` URI, or `:memory:`. Network schemes are
    /// rejected with [`KennelError::Config`]; those belong to
    /// [`LibsqlDogStore`](crate::LibsqlDogStore).
    pub async fn open(url: &str, auth_token: Option<&SecretString>) -> Result<Self, KennelError> {
        validate_url(url)?;

        let conn = tokio_rusqlite::Connection::open(url)
            .await
            .map_err(|e| KennelError::Storage {
                source: Box::new(e),
            })?;

        // The key must be the first statement on an encrypted connection.
        if let Some(token) = auth_token {
            let statement = format!(
                "PRAGMA key = '{}';",
                token.expose_secret().replace('\'', "''")
            );
            conn.call(move |conn| conn.execute_batch(&statement))
                .await
                .map_err(map_tr_err)?;
            debug!("database key applied");
        }

        conn.call(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
            .await
            .map_err(map_tr_err)?;

        if !is_memory(url) {
            let mode = conn
                .call(|conn| {
                    conn.query_row("PRAGMA journal_mode = WAL", [], |row| {
                        row.get::<_, String>(0)
                    })
                })
                .await
                .map_err(map_tr_err)?;
            debug!(journal_mode = %mode, "journal mode set");
        }

        conn.call(|conn| Ok::<_, rusqlite::Error>(migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)??;

        info!(url = %url, encrypted = auth_token.is_some(), "database opened");
        Ok(Self {
            conn,
            url: url.to_string(),
        })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// The endpoint this database was opened from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), KennelError> {
        if !is_memory(&self.url) {
            self.conn
                .call(|conn| conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);"))
                .await
                .map_err(map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        self.conn.close().await.map_err(|e| KennelError::Storage {
            source: Box::new(e),
        })?;
        info!(url = %self.url, "database closed");
        Ok(())
    }
}

fn is_memory(url: &str) -> bool {
    url == ":memory:" || url.contains("mode=memory")
}

fn validate_url(url: &str) -> Result<(), KennelError> {
    if url.trim().is_empty() {
        return Err(KennelError::Config("database url must not be empty".into()));
    }
    if !url.starts_with("file:")
        && let Some((scheme, _)) = url.split_once("://")
    {
        return Err(KennelError::Config(format!(
            "database url scheme `{scheme}` is not a local database"
        )));
    }
    Ok(())
}
