//! Sort parameters for list views.

use crate::error::CoreError;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `asc` / `desc` (case-insensitive). `None` yields `default`.
    pub fn parse(raw: Option<&str>, default: SortOrder) -> Result<Self, CoreError> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Ok(default),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid sortOrder '{other}'. Must be one of: asc, desc"
            ))),
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Fields a tour list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourSortField {
    CreatedAt,
    UpdatedAt,
    Name,
    Price,
    Rating,
}

impl TourSortField {
    const VALID: &'static [&'static str] = &["createdAt", "updatedAt", "name", "price", "rating"];

    /// Parse the `sortBy` query value. `title` is accepted as an alias of
    /// `name` for the public search.
    pub fn parse(raw: Option<&str>, default: TourSortField) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(default),
            Some("createdAt") => Ok(Self::CreatedAt),
            Some("updatedAt") => Ok(Self::UpdatedAt),
            Some("name") | Some("title") => Ok(Self::Name),
            Some("price") => Ok(Self::Price),
            Some("rating") => Ok(Self::Rating),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid sortBy '{other}'. Must be one of: {:?}",
                Self::VALID
            ))),
        }
    }

    /// Column the field is stored in.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Name => "name",
            Self::Price => "price",
            Self::Rating => "rating",
        }
    }
}

/// A resolved `(field, order)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourSort {
    pub field: TourSortField,
    pub order: SortOrder,
}

impl TourSort {
    /// Admin list default: newest first.
    pub const ADMIN_DEFAULT: TourSort = TourSort {
        field: TourSortField::CreatedAt,
        order: SortOrder::Desc,
    };

    /// Public search default: alphabetical.
    pub const PUBLIC_DEFAULT: TourSort = TourSort {
        field: TourSortField::Name,
        order: SortOrder::Asc,
    };

    /// Resolve `sortBy`/`sortOrder` against a default.
    ///
    /// When only `sortBy` is given, the order is the default's order.
    pub fn parse(
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        default: TourSort,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            field: TourSortField::parse(sort_by, default.field)?,
            order: SortOrder::parse(sort_order, default.order)?,
        })
    }
}
