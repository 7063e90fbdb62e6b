//! Tour types, inclusions and exclusions.
//!
//! The three collections are structurally identical flat lookups of unique
//! names; [`TaxonomyKind`] selects the collection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourbook_core::error::CoreError;
use tourbook_core::types::{DbId, Timestamp};
use validator::Validate;

use super::validation_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    TourType,
    Inclusion,
    Exclusion,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 3] = [Self::TourType, Self::Inclusion, Self::Exclusion];

    /// Backing table.
    pub fn table(self) -> &'static str {
        match self {
            Self::TourType => "tour_types",
            Self::Inclusion => "inclusions",
            Self::Exclusion => "exclusions",
        }
    }

    /// Human-readable entity name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            Self::TourType => "Tour type",
            Self::Inclusion => "Inclusion",
            Self::Exclusion => "Exclusion",
        }
    }

    /// Key of the item array in list responses.
    pub fn list_key(self) -> &'static str {
        match self {
            Self::TourType => "tourTypes",
            Self::Inclusion => "inclusions",
            Self::Exclusion => "exclusions",
        }
    }

    /// URL path segment under `/admin`.
    pub fn path(self) -> &'static str {
        match self {
            Self::TourType => "/tour-types",
            Self::Inclusion => "/inclusions",
            Self::Exclusion => "/exclusions",
        }
    }
}

/// A row from `tour_types`, `inclusions` or `exclusions`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyTerm {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a term.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TermInput {
    #[serde(default)]
    #[validate(length(max = 120))]
    pub name: String,
}

impl TermInput {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_have_distinct_tables_and_keys() {
        let tables: std::collections::HashSet<_> =
            TaxonomyKind::ALL.iter().map(|k| k.table()).collect();
        let keys: std::collections::HashSet<_> =
            TaxonomyKind::ALL.iter().map(|k| k.list_key()).collect();
        assert_eq!(tables.len(), 3);
        assert_eq!(keys.len(), 3);
        assert_eq!(TaxonomyKind::TourType.list_key(), "tourTypes");
    }
}
