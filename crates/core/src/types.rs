/// All primary keys are UUIDs (generated server-side, `gen_random_uuid()`
/// in Postgres).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC and stamped from the server's own clock.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
