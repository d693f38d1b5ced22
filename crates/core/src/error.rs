use thiserror::Error;

/// Why a raw log line was rejected at ingestion.
///
/// All variants are terminal: the record is permanently rejected and never
/// reaches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("record has no timestamp field")]
    MissingTimestamp,

    #[error("timestamp must be a string, got {found}")]
    InvalidTimestampType { found: &'static str },

    #[error("unparsable timestamp {value:?}: {source}")]
    UnparsableTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl ValidationError {
    /// Stable machine-readable label for per-line error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MalformedPayload(_) => "malformed_payload",
            ValidationError::MissingTimestamp => "missing_timestamp",
            ValidationError::InvalidTimestampType { .. } => "invalid_timestamp_type",
            ValidationError::UnparsableTimestamp { .. } => "unparsable_timestamp",
        }
    }
}
