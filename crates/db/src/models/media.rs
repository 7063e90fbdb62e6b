//! Media library items.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourbook_core::error::CoreError;
use tourbook_core::types::{DbId, Timestamp};
use validator::Validate;

use super::validation_error;

/// A row from the `media` table. Only `name` changes after creation.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    /// MIME type, e.g. `image/jpeg`.
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub created_at: Timestamp,
}

/// Body of `POST /media`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UploadMedia {
    /// Base64 payload, optionally wrapped in a `data:` URI.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
    #[serde(default, rename = "type")]
    #[validate(length(max = 127))]
    pub media_type: String,
}

impl UploadMedia {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        if self.image.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CoreError::Validation("Image and name are required".into()));
        }
        Ok(())
    }
}

/// Body of `PATCH /media`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RenameMedia {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
}

impl RenameMedia {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CoreError::Validation("ID and name are required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn upload_requires_image_and_name() {
        let upload = UploadMedia {
            image: String::new(),
            name: "taj.jpg".into(),
            media_type: "image/jpeg".into(),
        };
        assert_matches!(upload.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn type_field_is_renamed() {
        let upload: UploadMedia = serde_json::from_value(serde_json::json!({
            "image": "aGk=", "name": "hi.txt", "type": "text/plain"
        }))
        .unwrap();
        assert_eq!(upload.media_type, "text/plain");
        assert!(upload.check().is_ok());
    }

    #[test]
    fn rename_requires_id_and_name() {
        assert_matches!(
            RenameMedia::default().check(),
            Err(CoreError::Validation(_))
        );
    }
}
