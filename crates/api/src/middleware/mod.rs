//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated coach from a JWT Bearer token.

pub mod auth;
