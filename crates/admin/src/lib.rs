//! Back-office client for the Tourbook admin API.
//!
//! [`CatalogClient`] speaks HTTP; [`CategoryBoard`] and [`UploadQueue`] hold
//! the admin screens' local state and only talk to the server through the
//! [`CatalogApi`] trait, so they can be driven by a fake in tests.

pub mod board;
pub mod client;
pub mod error;
pub mod upload;

pub use board::CategoryBoard;
pub use client::{CatalogApi, CatalogClient, MediaUpload};
pub use error::ClientError;
pub use upload::{QueuedFile, UploadQueue, UploadState, MAX_UPLOAD_BYTES};
