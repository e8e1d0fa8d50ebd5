// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for kennel.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Top-level kennel configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KennelConfig {
    /// HTTP listener and static asset settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database endpoint and credentials.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for GET paths no route matches.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Database endpoint configuration.
///
/// These two values are the only environment-derived inputs of the data path.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database endpoint. A file path, a `file:` URL or `:memory:` opens a
    /// local database; `libsql://`, `https://` or `http://` reaches a remote
    /// libSQL server.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Auth token. Remote servers receive it as a bearer token; a local
    /// database is keyed with it. `None` sends no token or opens unencrypted.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            auth_token: None,
        }
    }
}

impl DatabaseConfig {
    /// The auth token wrapped so it cannot leak through logs.
    pub fn auth_token_secret(&self) -> Option<SecretString> {
        self.auth_token.clone().map(SecretString::from)
    }

    /// Copy of this config safe for display, with the token masked.
    pub fn redacted(&self) -> Self {
        Self {
            url: self.url.clone(),
            auth_token: self.auth_token.as_ref().map(|_| "[redacted]".to_string()),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

fn default_database_url() -> String {
    "kennel.db".to_string()
}

impl KennelConfig {
    /// Copy of the whole config safe for printing.
    pub fn redacted(&self) -> Self {
        Self {
            server: self.server.clone(),
            database: self.database.redacted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn debug_output_redacts_token() {
        let db = DatabaseConfig {
            url: "kennel.db".into(),
            auth_token: Some("super-secret-token".into()),
        };
        let debug = format!("{db:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn secret_exposes_original_token() {
        let db = DatabaseConfig {
            url: "kennel.db".into(),
            auth_token: Some("tok".into()),
        };
        let secret = db.auth_token_secret().unwrap();
        assert_eq!(secret.expose_secret(), "tok");
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn redacted_config_keeps_url() {
        let mut config = KennelConfig::default();
        config.database.auth_token = Some("tok".into());
        let redacted = config.redacted();
        assert_eq!(redacted.database.url, "kennel.db");
        assert_eq!(redacted.database.auth_token.as_deref(), Some("[redacted]"));
    }
}
