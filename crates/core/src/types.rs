use crate::error::CoreError;

/// All document identifiers are UUIDv7, generated application-side and
/// serialized as strings at the API boundary.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered document identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Parse a caller-supplied identifier.
///
/// Malformed identifiers are a validation failure, never a lookup miss.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<uuid::Uuid>()
        .map_err(|_| CoreError::Validation(format!("Invalid ID '{raw}'")))
}
