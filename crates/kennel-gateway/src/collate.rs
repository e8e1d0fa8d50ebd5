// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name ordering for the table.
//!
//! Approximates the default locale collation browsers use: letters compare
//! first without case or accents, then accents decide, then lowercase sorts
//! before uppercase.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Base letters only: decomposed, marks dropped, lowercased.
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Letters with their accents, case folded.
fn accented(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Compare two names the way a locale-aware sort would.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
