// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! source spans, valid key listings, and "did you mean?" suggestions
//! using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(kennel::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(kennel::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(kennel::config::missing_key),
        help("add `{key} = <value>` to your kennel.toml")
    )]
    MissingKey { key: String },

    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(kennel::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(kennel::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into one diagnostic per contained error.
///
/// `toml_sources` pairs each file that took part in the merge with its
/// contents, so unknown keys can be pointed at.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path: Vec<String> = error.path.iter().map(ToString::to_string).collect();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (key, section) = key_and_section(&path, field);
                    let (span, src) = locate(&error, section, field, toml_sources);
                    ConfigError::UnknownKey {
                        key,
                        suggestion: suggest_key(field, *expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: key_and_section(&path, field).0,
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: path.join("."),
                    detail: format!("found {actual}"),
                    expected: expected.clone(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Dotted key of `field` and the table it lives in.
///
/// Figment's error path usually already ends with the offending field; when
/// it does not, the path is the enclosing table.
fn key_and_section<'a>(path: &'a [String], field: &str) -> (String, &'a [String]) {
    match path.split_last() {
        Some((last, parent)) if last == field => (path.join("."), parent),
        _ => {
            let mut key = path.join(".");
            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(field);
            (key, path)
        }
    }
}

/// Resolve the file an error came from and the span of `field` in it.
fn locate(
    error: &figment::error::Error,
    section: &[String],
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(
                std::fs::canonicalize(path)
                    .unwrap_or_else(|_| path.clone())
                    .display()
                    .to_string(),
            ),
            _ => None,
        });

    // Inline strings have no file origin; a lone source must be the one.
    let found = match (origin, toml_sources) {
        (Some(path), sources) => sources.iter().find(|(p, _)| *p == path),
        (None, [only]) => Some(only),
        (None, _) => None,
    };

    found
        .and_then(|(path, content)| {
            let offset = find_key_offset(content, section, field)?;
            Some((
                Some(SourceSpan::new(offset.into(), field.len())),
                Some(NamedSource::new(path, content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `field` inside the `[section]` table of a TOML document.
///
/// With an empty `section` the whole document is searched. Only a key at
/// the start of a line followed by whitespace or `=` matches.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let start = match section.first() {
        None => 0,
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let key = line.trim_start();
        if key.starts_with('[') {
            break;
        }
        if let Some(rest) = key.strip_prefix(field)
            && rest.starts_with([' ', '\t', '='])
        {
            return Some(offset + (line.len() - key.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if it clears the threshold.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, valid_keys: &[S]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key.as_ref()), key.as_ref()))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_prot_for_port() {
        let valid = &["host", "port", "public_dir", "log_level"];
        assert_eq!(suggest_key("prot", valid), Some("port".to_string()));
    }

    #[test]
    fn suggest_auth_tokn_for_auth_token() {
        let valid = &["url", "auth_token"];
        assert_eq!(
            suggest_key("auth_tokn", valid),
            Some("auth_token".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["url", "auth_token"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[server]\nprot = 80\n";
        let path = vec!["server".to_string()];
        let o = find_key_offset(content, &path, "prot").unwrap();
        assert_eq!(&content[o..o + 4], "prot");
    }

    #[test]
    fn find_key_offset_stops_at_next_table() {
        let content = "[server]\nhost = \"x\"\n[database]\nprot = 1\n";
        let path = vec!["server".to_string()];
        assert_eq!(find_key_offset(content, &path, "prot"), None);
    }

    #[test]
    fn key_is_not_doubled_when_path_ends_with_field() {
        let path = vec!["database".to_string(), "ulr".to_string()];
        let (key, section) = key_and_section(&path, "ulr");
        assert_eq!(key, "database.ulr");
        assert_eq!(section, ["database".to_string()]);
    }

    #[test]
    fn key_appends_field_to_table_path() {
        let path = vec!["database".to_string()];
        let (key, section) = key_and_section(&path, "ulr");
        assert_eq!(key, "database.ulr");
        assert_eq!(section, ["database".to_string()]);
        assert_eq!(key_and_section(&[], "server").0, "server");
    }

    #[test]
    fn unknown_key_help_lists_suggestion() {
        let help = format_unknown_key_help(Some("port"), "host, port");
        assert!(help.starts_with("did you mean `port`?"));
    }

    #[test]
    fn find_key_offset_skips_other_sections() {
        let content = "[server]\nurl = \"x\"\n[database]\nurl = \"y\"\n";
        let path = vec!["database".to_string()];
        let o = find_key_offset(content, &path, "url").unwrap();
        assert!(o > content.find("[database]").unwrap());
    }
}
