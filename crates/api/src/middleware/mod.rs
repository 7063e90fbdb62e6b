//! Request middleware.
//!
//! - [`admin_gate::require_admin`] -- bearer-token gate in front of `/admin`.

pub mod admin_gate;
