use thiserror::Error;

/// Unified error type for the rate-chart-core library.
///
/// The normalization engine itself never fails: unusable values and records
/// degrade to `None` or are dropped. Errors only surface at the facade
/// boundary (payload decoding, settings and request validation).
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Payload ─────────────────────────────────────────────────────
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── Requests ────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
