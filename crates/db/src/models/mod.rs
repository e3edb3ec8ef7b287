//! Row models and DTOs.

pub mod court_recording;
pub mod team;
