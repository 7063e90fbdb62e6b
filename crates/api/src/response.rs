//! Shared response body types for API handlers.
//!
//! List endpoints return `{ "<resource>": [...], "pagination": {...} }`.
//! Single documents are returned bare, deletes return `{ "message": ... }`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tourbook_core::search::{PageRequest, Pagination};

/// A page of items under a resource-specific key.
#[derive(Debug)]
pub struct ListResponse<T> {
    pub key: &'static str,
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListResponse<T> {
    pub fn new(key: &'static str, (items, total): (Vec<T>, i64), page: PageRequest) -> Self {
        Self {
            key,
            items,
            pagination: Pagination::new(total, page),
        }
    }
}

impl<T: Serialize> Serialize for ListResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}

/// `{ "message": "..." }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by the category reorder endpoint.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub message: String,
    pub updated: u64,
}
