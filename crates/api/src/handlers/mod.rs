pub mod court_recording;
pub mod team;
