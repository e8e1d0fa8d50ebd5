// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kennel.toml` > `~/.config/kennel/kennel.toml` > `/etc/kennel/kennel.toml`
//! with environment variable overrides via `KENNEL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KennelConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/kennel/kennel.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "kennel.toml";

/// Paths searched by [`load_config`], lowest priority first.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("kennel/kennel.toml"));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_PATH));
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kennel/kennel.toml` (system-wide)
/// 3. `~/.config/kennel/kennel.toml` (user XDG config)
/// 4. `./kennel.toml` (local directory)
/// 5. `KENNEL_*` environment variables
pub fn load_config() -> Result<KennelConfig, figment::Error> {
    build_figment().extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(KennelConfig::default()));
    for path in config_search_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KennelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KennelConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KennelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KennelConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `KENNEL_DATABASE_AUTH_TOKEN` must
/// map to `database.auth_token`, not `database.auth.token`.
fn env_provider() -> Env {
    Env::prefixed("KENNEL_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("server_", "server.", 1)
        .replacen("database_", "database.", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_only_the_section_separator() {
        assert_eq!(map_env_key("database_auth_token"), "database.auth_token");
        assert_eq!(map_env_key("database_url"), "database.url");
        assert_eq!(map_env_key("server_public_dir"), "server.public_dir");
        assert_eq!(map_env_key("server_log_level"), "server.log_level");
    }

    #[test]
    fn search_paths_end_with_local_file() {
        let paths = config_search_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from(SYSTEM_CONFIG_PATH)));
        assert_eq!(paths.last(), Some(&PathBuf::from(LOCAL_CONFIG_PATH)));
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let config = load_config_from_path(Path::new("/nonexistent/kennel.toml"))
            .expect("missing file should be skipped");
        assert_eq!(config.server.port, 3000);
    }
}
