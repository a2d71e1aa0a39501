/// Record identifiers are derived from the wall clock (milliseconds since the
/// Unix epoch) when a record is created.
pub type RecordId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
