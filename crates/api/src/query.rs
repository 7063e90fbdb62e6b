//! Query-string parameter types shared by the list handlers, and their
//! conversion into validated store queries.

use serde::Deserialize;
use tourbook_core::error::CoreError;
use tourbook_core::search::{normalize_search, PageRequest, DEFAULT_PAGE_SIZE};
use tourbook_core::sorting::TourSort;
use tourbook_core::tour::{Difficulty, TourStatus};
use tourbook_db::models::query::{ListQuery, TourQuery};

/// Lookup lists (taxonomy dropdowns in the tour form, public category
/// navigation) default to a page large enough to hold every entry.
pub const LOOKUP_PAGE_SIZE: i64 = 100;

/// `?page=&limit=&search=` for categories, taxonomy terms and media.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn into_query(self, default_limit: i64) -> Result<ListQuery, CoreError> {
        Ok(ListQuery {
            page: PageRequest::from_params(self.page, self.limit, default_limit)?,
            search: normalize_search(self.search.as_deref()),
        })
    }
}

/// Admin tour table parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub difficulty: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl TourListParams {
    pub fn into_query(self) -> Result<TourQuery, CoreError> {
        Ok(TourQuery {
            page: PageRequest::from_params(self.page, self.limit, DEFAULT_PAGE_SIZE)?,
            search: normalize_search(self.search.as_deref()),
            category: normalize_search(self.category.as_deref()),
            status: blank_to_none(self.status.as_deref())
                .map(TourStatus::parse)
                .transpose()?,
            featured: self.featured,
            difficulty: blank_to_none(self.difficulty.as_deref())
                .map(Difficulty::parse)
                .transpose()?,
            sort: TourSort::parse(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                TourSort::ADMIN_DEFAULT,
            )?,
        })
    }
}

/// Public tour search parameters. Only active tours are ever returned.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTourParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl PublicTourParams {
    pub fn into_query(self) -> Result<TourQuery, CoreError> {
        Ok(TourQuery {
            page: PageRequest::from_params(self.page, self.limit, DEFAULT_PAGE_SIZE)?,
            search: normalize_search(self.q.as_deref()),
            category: normalize_search(self.category.as_deref()),
            status: Some(TourStatus::Active),
            featured: None,
            difficulty: None,
            sort: TourSort::parse(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                TourSort::PUBLIC_DEFAULT,
            )?,
        })
    }
}

/// `?adults=&variant=` on the checkout quote.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutParams {
    pub adults: Option<u32>,
    pub variant: Option<String>,
}

/// `?id=&url=` on media deletion.
#[derive(Debug, Default, Deserialize)]
pub struct MediaDeleteParams {
    pub id: Option<String>,
    pub url: Option<String>,
}

fn blank_to_none(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tourbook_core::sorting::{SortOrder, TourSortField};

    #[test]
    fn tour_params_parse_filters() {
        let query = TourListParams {
            status: Some("inactive".into()),
            difficulty: Some("moderate".into()),
            sort_by: Some("price".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.status, Some(TourStatus::Inactive));
        assert_eq!(query.difficulty, Some(Difficulty::Moderate));
        assert_eq!(query.sort.field, TourSortField::Price);
        assert_eq!(query.sort.order, SortOrder::Asc);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let query = TourListParams {
            status: Some(" ".into()),
            search: Some("".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.status, None);
        assert_eq!(query.search, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!(
            TourListParams {
                status: Some("archived".into()),
                ..Default::default()
            }
            .into_query(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn public_search_is_active_only() {
        let query = PublicTourParams::default().into_query().unwrap();
        assert_eq!(query.status, Some(TourStatus::Active));
        assert_eq!(query.sort, TourSort::PUBLIC_DEFAULT);
    }

    #[test]
    fn list_params_use_caller_default() {
        let query = ListParams::default().into_query(LOOKUP_PAGE_SIZE).unwrap();
        assert_eq!(query.page.limit, LOOKUP_PAGE_SIZE);
    }
}
