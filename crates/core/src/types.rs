/// Paging keys are the id of the first article in a page.
pub type PagingKey = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
