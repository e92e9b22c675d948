//! Business logic services.
//!
//! - `auth` - Registration and credential verification

pub mod auth;
