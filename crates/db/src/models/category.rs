//! Category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourbook_core::error::CoreError;
use tourbook_core::types::{DbId, Timestamp};
use validator::Validate;

use super::validation_error;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub image_url: Option<String>,
    /// Admin-controlled display position, 1-based.
    pub sequence: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. A missing slug is derived from the name.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(length(max = 120))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 120))]
    pub slug: Option<String>,
    /// Either an existing URL or a `data:` URI to upload.
    pub image_url: Option<String>,
}

impl CreateCategory {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

/// DTO for updating a category. All fields optional; slug is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Either an existing URL or a `data:` URI to upload.
    pub image_url: Option<String>,
}

impl UpdateCategory {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

/// Body of `PUT /categories/reorder`.
///
/// The admin UI sends `{ "_id": ..., "sequence": ... }` objects; bare id
/// strings are accepted too. Only the array position matters.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderCategories {
    pub categories: Vec<ReorderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReorderEntry {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl ReorderEntry {
    pub fn raw_id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Doc { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_accepts_ids_and_documents() {
        let body: ReorderCategories = serde_json::from_value(serde_json::json!({
            "categories": [
                "0190f5d2-0000-7000-8000-000000000001",
                { "_id": "0190f5d2-0000-7000-8000-000000000002", "sequence": 9 }
            ]
        }))
        .unwrap();
        let ids: Vec<_> = body.categories.iter().map(ReorderEntry::raw_id).collect();
        assert_eq!(
            ids,
            vec![
                "0190f5d2-0000-7000-8000-000000000001",
                "0190f5d2-0000-7000-8000-000000000002"
            ]
        );
    }

    #[test]
    fn update_ignores_slug_field() {
        let update: UpdateCategory =
            serde_json::from_value(serde_json::json!({ "name": "Culture", "slug": "x" })).unwrap();
        assert_eq!(update.name.as_deref(), Some("Culture"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let create = CreateCategory {
            name: "x".repeat(121),
            ..Default::default()
        };
        assert!(create.check().is_err());
    }
}
