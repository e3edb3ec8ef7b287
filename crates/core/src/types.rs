/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of an in-session court element (player, action, recording).
///
/// Generated as a UUID v4 string so ids survive a round trip through
/// storage unchanged.
pub type ElementId = String;

/// Generate a fresh [`ElementId`].
pub fn new_element_id() -> ElementId {
    uuid::Uuid::new_v4().to_string()
}
