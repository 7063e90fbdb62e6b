//! Tour document model and DTOs.
//!
//! Category, tour type, inclusions and exclusions are stored as the plain
//! strings the admin picked, not as ids. Renaming a taxonomy term therefore
//! leaves existing tours untouched.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use tourbook_core::error::CoreError;
use tourbook_core::naming::{normalize_name, slug_or_derive};
use tourbook_core::tour::{validate_price, Difficulty, TourStatus};
use tourbook_core::types::{DbId, Timestamp};
use validator::Validate;

use super::validation_error;

// ---------------------------------------------------------------------------
// Embedded documents
// ---------------------------------------------------------------------------

/// A named price point, e.g. "Private car" vs "Shared coach".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourVariant {
    pub name: String,
    pub price: f64,
}

/// An image reference chosen from the media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Geocoder result stored verbatim on an itinerary stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryLocation {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub coordinates: Coordinates,
}

/// One stop of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// Free text ("Day 1", "09:00") or an hour count.
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TourImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ItineraryLocation>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

// ---------------------------------------------------------------------------
// Tour
// ---------------------------------------------------------------------------

/// A row from the `tours` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
    #[sqlx(json)]
    pub variants: Vec<TourVariant>,
    /// Category slug.
    pub category: String,
    /// Tour type name.
    pub tour_type: Option<String>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    #[sqlx(json)]
    pub itinerary: Vec<ItineraryDay>,
    #[sqlx(json)]
    pub images: Vec<TourImage>,
    #[sqlx(json)]
    pub cover_image: Option<TourImage>,
    pub video: Option<String>,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    #[sqlx(try_from = "String")]
    pub status: TourStatus,
    pub featured: bool,
    pub rating: f64,
    pub review_count: i32,
    pub slug: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tour {
    /// Every image URL the tour owns: cover first, then the gallery.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.cover_image
            .iter()
            .chain(self.images.iter())
            .map(|img| img.url.as_str())
    }

    /// `(name, price)` pairs for checkout pricing.
    pub fn variant_prices(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variants.iter().map(|v| (v.name.as_str(), v.price))
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Full tour payload, used for both create (`POST`) and replace (`PUT`).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TourInput {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub duration: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub variants: Vec<TourVariant>,
    #[serde(default)]
    pub category: String,
    pub tour_type: Option<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub images: Vec<TourImage>,
    pub cover_image: Option<TourImage>,
    #[validate(url)]
    pub video: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: TourStatus,
    #[serde(default)]
    pub featured: bool,
    #[validate(length(max = 200))]
    pub slug: Option<String>,
    #[validate(length(max = 200))]
    pub seo_title: Option<String>,
    #[validate(length(max = 500))]
    pub seo_description: Option<String>,
    #[validate(length(max = 500))]
    pub seo_keywords: Option<String>,
}

impl TourInput {
    /// Boundary validation: field bounds, a non-empty name and positive
    /// prices.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        normalize_name(&self.name)?;
        validate_price("price", self.price)?;
        for variant in &self.variants {
            if variant.name.trim().is_empty() {
                return Err(CoreError::Validation("Variant name is required".into()));
            }
            validate_price("variant price", variant.price)?;
        }
        Ok(())
    }

    /// Build a brand-new tour. Rating and review count start at zero.
    pub fn into_new_tour(self, id: DbId, now: Timestamp) -> Tour {
        self.into_tour(id, 0.0, 0, now, now)
    }

    /// Build the replacement for `existing`, keeping its id, creation time
    /// and the server-maintained review fields.
    pub fn into_replacement(self, existing: &Tour, now: Timestamp) -> Tour {
        self.into_tour(
            existing.id,
            existing.rating,
            existing.review_count,
            existing.created_at,
            now,
        )
    }

    fn into_tour(
        self,
        id: DbId,
        rating: f64,
        review_count: i32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Tour {
        let name = self.name.trim().to_string();
        let slug = slug_or_derive(self.slug.as_deref(), &name);
        Tour {
            id,
            name,
            description: self.description,
            duration: self.duration,
            price: self.price,
            variants: self.variants,
            category: self.category,
            tour_type: self.tour_type.filter(|t| !t.trim().is_empty()),
            inclusions: self.inclusions,
            exclusions: self.exclusions,
            itinerary: self.itinerary,
            images: self.images,
            cover_image: self.cover_image,
            video: self.video.filter(|v| !v.trim().is_empty()),
            difficulty: self.difficulty,
            status: self.status,
            featured: self.featured,
            rating,
            review_count,
            slug: Some(slug),
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            seo_keywords: self.seo_keywords,
            created_at,
            updated_at,
        }
    }
}

/// Partial update: the status and featured toggles of the admin table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TourPatch {
    pub status: Option<TourStatus>,
    pub featured: Option<bool>,
}

impl TourPatch {
    pub fn check(&self) -> Result<(), CoreError> {
        if self.status.is_none() && self.featured.is_none() {
            return Err(CoreError::Validation(
                "Patch must set status or featured".into(),
            ));
        }
        Ok(())
    }

    /// Apply the toggles to an in-memory document.
    pub fn apply(&self, tour: &mut Tour, now: Timestamp) {
        if let Some(status) = self.status {
            tour.status = status;
        }
        if let Some(featured) = self.featured {
            tour.featured = featured;
        }
        tour.updated_at = now;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
