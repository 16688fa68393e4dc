//! Tag Normalization
//!
//! Client-supplied tag lists are cleaned best-effort: bad entries are
//! dropped, never reported.
//!
//! Pipeline: [`normalize_tags`] -> [`validate_tag`] (drop invalid) ->
//! [`sanitize_tag`] (drop empty).

use std::collections::HashSet;

/// Maximum tag length in bytes
pub const TAG_MAX_LENGTH: usize = 50;

/// Trim, lowercase, drop empties, and de-duplicate keeping first occurrence
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for tag in tags {
        let clean = tag.as_ref().trim().to_lowercase();
        if clean.is_empty() || seen.contains(&clean) {
            continue;
        }
        seen.insert(clean.clone());
        normalized.push(clean);
    }

    normalized
}

/// A tag is valid when non-empty, at most 50 bytes, and `[A-Za-z0-9_-]` only
pub fn validate_tag(tag: &str) -> bool {
    let tag = tag.trim();

    !tag.is_empty()
        && tag.len() <= TAG_MAX_LENGTH
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Storage form: lowercase, spaces to dashes, no repeated or edge dashes
pub fn sanitize_tag(tag: &str) -> String {
    let mut clean = tag.trim().to_lowercase().replace(' ', "-");

    while clean.contains("--") {
        clean = clean.replace("--", "-");
    }

    clean.trim_matches('-').to_string()
}

/// Full pipeline applied to a request's `tagList`
pub fn prepare_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut prepared: Vec<String> = Vec::new();

    for tag in normalize_tags(tags) {
        if !validate_tag(&tag) {
            continue;
        }
        let sanitized = sanitize_tag(&tag);
        // Sanitizing can make two distinct tags equal ("-go" and "go")
        if !sanitized.is_empty() && !prepared.contains(&sanitized) {
            prepared.push(sanitized);
        }
    }

    prepared
}
