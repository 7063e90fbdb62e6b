//! Tour enums and field rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Challenging => "challenging",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "challenging" => Ok(Self::Challenging),
            other => Err(CoreError::Validation(format!(
                "Invalid difficulty '{other}'. Must be one of: easy, moderate, challenging"
            ))),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Publication status. Only active tours are visible on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    #[default]
    Active,
    Inactive,
}

impl TourStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: active, inactive"
            ))),
        }
    }

    pub fn is_public(self) -> bool {
        self == Self::Active
    }
}

impl TryFrom<String> for TourStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Base and variant prices must be finite and strictly positive.
pub fn validate_price(field: &str, price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn difficulty_round_trips_through_str() {
        for d in [Difficulty::Easy, Difficulty::Moderate, Difficulty::Challenging] {
            assert_eq!(Difficulty::parse(d.as_str()).unwrap(), d);
        }
    }

    #[test]
    fn status_rejects_unknown() {
        assert_matches!(TourStatus::parse("draft"), Err(CoreError::Validation(_)));
        assert_matches!(
            TourStatus::try_from("archived".to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn only_active_is_public() {
        assert!(TourStatus::Active.is_public());
        assert!(!TourStatus::Inactive.is_public());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TourStatus::Inactive).unwrap(),
            serde_json::json!("inactive")
        );
    }

    #[test]
    fn price_must_be_positive_and_finite() {
        assert!(validate_price("price", 120.0).is_ok());
        assert_matches!(validate_price("price", 0.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_price("price", -5.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_price("price", f64::NAN), Err(CoreError::Validation(_)));
    }
}
