//! Slug Value Object
//!
//! URL identifier derived from an article title plus a random suffix, e.g.
//! `"How to train your dragon"` -> `how-to-train-your-dragon-k3x9q2`.

use platform::crypto::{LOWER_ALPHANUMERIC, random_string};
use serde::Serialize;
use std::fmt;

/// Random suffix length
pub const SLUG_SUFFIX_LENGTH: usize = 6;

/// Base used when a title has no letters or digits
const FALLBACK_BASE: &str = "article";

/// Article slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a fresh slug from `title`
    ///
    /// Two calls with the same title yield different slugs.
    pub fn from_title(title: &str) -> Self {
        let suffix = random_string(SLUG_SUFFIX_LENGTH, LOWER_ALPHANUMERIC);
        Self(format!("{}-{}", slug_base(title), suffix))
    }

    /// Wrap a slug taken from a path or the database
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, collapse every run of non letter/digit characters into one
/// dash, then trim edge dashes
fn slug_base(title: &str) -> String {
    let mut base = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_alphabetic() || c.is_numeric() {
            if pending_dash && !base.is_empty() {
                base.push('-');
            }
            pending_dash = false;
            base.push(c);
        } else {
            pending_dash = true;
        }
    }

    if base.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        base
    }
}
