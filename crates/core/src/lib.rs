//! Domain rules for the tour catalog.
//!
//! Everything in this crate is pure: no I/O, no async. The db, storage and
//! api crates build on these types and rules.

pub mod checkout;
pub mod error;
pub mod naming;
pub mod reorder;
pub mod search;
pub mod sorting;
pub mod tour;
pub mod types;
