use thiserror::Error;

/// Failures that abort normalization of a whole document. Field-level
/// anomalies never surface here; they become [`crate::Diagnostic`]s.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed markup at byte {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("document has no root element")]
    EmptyDocument,
    #[error("document does not state its {field}")]
    MissingIdentity { field: &'static str },
    #[error("document {field} {raw:?} is not usable: {reason}")]
    InvalidIdentity {
        field: &'static str,
        raw: String,
        reason: String,
    },
}
