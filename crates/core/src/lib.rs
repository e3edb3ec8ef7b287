//! Courtboard core: domain types and the court recording/playback engine.
//!
//! This crate has no internal workspace dependencies. The `db` crate
//! implements the persistence gateway declared in [`court::gateway`] and the
//! `api` crate exposes stored recordings over HTTP.

pub mod court;
pub mod error;
pub mod types;
