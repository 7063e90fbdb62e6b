//! HTTP handlers, one module per resource.

pub mod categories;
pub mod media;
pub mod public;
pub mod taxonomy;
pub mod tours;
