//! Checkout quote and spot-hold timer.
//!
//! A quote prices a tour for a number of adults, optionally using a named
//! pricing variant. The checkout page holds the spot for a fixed window and
//! shows the remaining time as `m:ss`.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// How long a checkout holds the traveller's spot.
pub const HOLD_DURATION_SECS: i64 = 30 * 60;

/// Largest party a single checkout accepts.
pub const MAX_ADULTS: u32 = 20;

/// Validate the party size, defaulting to one adult.
pub fn validate_adults(adults: Option<u32>) -> Result<u32, CoreError> {
    let adults = adults.unwrap_or(1);
    if adults == 0 || adults > MAX_ADULTS {
        return Err(CoreError::Validation(format!(
            "adults must be between 1 and {MAX_ADULTS}"
        )));
    }
    Ok(adults)
}

/// Resolve the per-person price.
///
/// With no variant selected the base price applies; a selected variant must
/// exist on the tour.
pub fn unit_price<'a, I>(base_price: f64, variants: I, selected: Option<&str>) -> Result<f64, CoreError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let Some(wanted) = selected.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(base_price);
    };
    variants
        .into_iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, price)| price)
        .ok_or_else(|| CoreError::Validation(format!("Unknown variant '{wanted}'")))
}

/// Total for the whole party.
pub fn total_price(unit_price: f64, adults: u32) -> f64 {
    unit_price * f64::from(adults)
}

// ---------------------------------------------------------------------------
// Hold timer
// ---------------------------------------------------------------------------

/// A countdown that starts when the quote is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub started_at: Timestamp,
    pub duration_secs: i64,
}

impl HoldTimer {
    pub fn start(now: Timestamp) -> Self {
        Self {
            started_at: now,
            duration_secs: HOLD_DURATION_SECS,
        }
    }

    pub fn expires_at(&self) -> Timestamp {
        self.started_at + Duration::seconds(self.duration_secs)
    }

    /// Seconds left at `now`, never negative.
    pub fn remaining_secs(&self, now: Timestamp) -> i64 {
        (self.expires_at() - now).num_seconds().max(0)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.remaining_secs(now) == 0
    }
}

/// Render seconds as `m:ss`.
///
/// ```
/// use tourbook_core::checkout::format_remaining;
///
/// assert_eq!(format_remaining(1800), "30:00");
/// assert_eq!(format_remaining(65), "1:05");
/// ```
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}
