// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for kennel.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use kennel_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("listening on {}", config.server.bind_addr());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{DatabaseConfig, KennelConfig, ServerConfig};

/// Load configuration and validate it.
///
/// With `path`, only that file (plus `KENNEL_*` env vars) is read; otherwise
/// the XDG hierarchy is searched. Figment errors are converted into
/// diagnostics with typo suggestions.
pub fn load_and_validate(path: Option<&Path>) -> Result<KennelConfig, Vec<ConfigError>> {
    let loaded = match path {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = collect_toml_sources(path);
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<KennelConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let paths = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => loader::config_search_paths(),
    };

    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let display = std::fs::canonicalize(&path)
                .unwrap_or(path)
                .display()
                .to_string();
            Some((display, content))
        })
        .collect()
}
