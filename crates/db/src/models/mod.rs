//! Document shapes for the six catalog collections.
//!
//! Every model serializes with camelCase field names and exposes its id as
//! `_id`, so the JSON returned by the API is the persisted document.

pub mod category;
pub mod media;
pub mod query;
pub mod taxonomy;
pub mod tour;

/// Map `validator` failures onto the domain validation error.
pub(crate) fn validation_error(errors: validator::ValidationErrors) -> tourbook_core::error::CoreError {
    tourbook_core::error::CoreError::Validation(errors.to_string())
}
