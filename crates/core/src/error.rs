use crate::types::PagingKey;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Key range overflow: key {key} with load size {load_size}")]
    KeyOverflow { key: PagingKey, load_size: i64 },

    #[error("Creation time for article {id} is outside the representable range")]
    TimestampOutOfRange { id: i64 },
}
