//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod court_recording_repo;
pub mod team_repo;

pub use court_recording_repo::CourtRecordingRepo;
pub use team_repo::TeamRepo;
