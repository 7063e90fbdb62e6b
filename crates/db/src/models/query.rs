//! Store-level list queries, built by handlers from validated parameters.

use tourbook_core::search::PageRequest;
use tourbook_core::sorting::TourSort;
use tourbook_core::tour::{Difficulty, TourStatus};

/// Paging plus an optional name search. Used by categories, taxonomy terms
/// and media.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: PageRequest,
    pub search: Option<String>,
}

/// Tour list filters. `search` matches name or description.
#[derive(Debug, Clone, PartialEq)]
pub struct TourQuery {
    pub page: PageRequest,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<TourStatus>,
    pub featured: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub sort: TourSort,
}

impl Default for TourQuery {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            search: None,
            category: None,
            status: None,
            featured: None,
            difficulty: None,
            sort: TourSort::ADMIN_DEFAULT,
        }
    }
}
