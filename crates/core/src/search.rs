//! Pagination and free-text search helpers shared by every list view.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page size used when the caller does not supply `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on `limit`. The admin category board asks for everything at
/// once, so this is generous.
pub const MAX_PAGE_SIZE: i64 = 1000;

// ---------------------------------------------------------------------------
// Page request
// ---------------------------------------------------------------------------

/// A validated `(page, limit)` pair. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Validate raw query values.
    ///
    /// Missing values take their defaults; `page < 1` and `limit < 1` are
    /// rejected; `limit` above [`MAX_PAGE_SIZE`] is clamped.
    pub fn from_params(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: i64,
    ) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        let limit = limit.unwrap_or(default_limit);
        if limit < 1 {
            return Err(CoreError::Validation("limit must be at least 1".into()));
        }
        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }

    /// Number of records to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination metadata
// ---------------------------------------------------------------------------

/// The `pagination` object attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }
}

/// `ceil(total / limit)`, zero when there is nothing to page through.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Search terms
// ---------------------------------------------------------------------------

/// Trim a search term; blank terms mean "no search".
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and `\` so a term is matched literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `ILIKE` pattern for a case-insensitive substring match.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// In-process equivalent of [`contains_pattern`] matching.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_apply_when_params_missing() {
        let req = PageRequest::from_params(None, None, DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let req = PageRequest::from_params(Some(3), Some(20), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn page_and_limit_must_be_positive() {
        assert_matches!(
            PageRequest::from_params(Some(0), None, DEFAULT_PAGE_SIZE),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PageRequest::from_params(None, Some(0), DEFAULT_PAGE_SIZE),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PageRequest::from_params(Some(-2), Some(-1), DEFAULT_PAGE_SIZE),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn limit_is_clamped() {
        let req = PageRequest::from_params(None, Some(50_000), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(req.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 7), 4);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let p = Pagination::new(
            21,
            PageRequest {
                page: 2,
                limit: 10,
            },
        );
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["total"], 21);
        assert_eq!(json["page"], 2);
    }

    #[test]
    fn blank_search_is_none() {
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some(" safari ")), Some("safari".into()));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(contains_pattern("taj"), "%taj%");
    }

    #[test]
    fn contains_ignores_case() {
        assert!(contains_ignore_case("Golden Triangle", "triangle"));
        assert!(!contains_ignore_case("Golden Triangle", "square"));
    }
}
