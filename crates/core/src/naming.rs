//! Name, slug and blob-key rules.
//!
//! Taxonomy names are trimmed before storage and compared
//! case-insensitively. Category slugs are derived from names with a
//! deliberately simple rule (lower-case, spaces to hyphens) so that slugs the
//! admin UI generated in the past keep resolving.

use crate::error::CoreError;

/// Trim a name and reject it when nothing is left.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive name equality, the uniqueness rule for taxonomy terms and
/// categories.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Derive a slug from a display name.
///
/// ```
/// use tourbook_core::naming::derive_slug;
///
/// assert_eq!(derive_slug("Adventure Tours"), "adventure-tours");
/// assert_eq!(derive_slug("  Wildlife "), "wildlife");
/// ```
pub fn derive_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// Pick the caller's slug when present, otherwise derive one from `name`.
pub fn slug_or_derive(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => derive_slug(name),
    }
}

/// Object key for an uploaded blob: `{prefix/}{millis}-{name}`.
///
/// The timestamp keeps repeated uploads of the same file name apart. Path
/// separators in `name` are flattened so a display name cannot escape the
/// prefix.
pub fn timestamped_key(prefix: Option<&str>, millis: i64, name: &str) -> String {
    let flat: String = name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    match prefix {
        Some(p) => format!("{}/{millis}-{flat}", p.trim_end_matches('/')),
        None => format!("{millis}-{flat}"),
    }
}
