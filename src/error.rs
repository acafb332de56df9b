use std::error::Error as StdError;

use thiserror::Error;

/// The backing table could not be read or contained no recognizable sheet.
///
/// Fatal to the current pipeline run: callers never see a partially
/// populated result. Per-cell coercion problems are absorbed during
/// normalization and never surface here.
#[derive(Debug, Error)]
#[error("source `{source_id}` unavailable")]
pub struct SourceUnavailable {
    /// The source identifier that was attempted (file path, usually).
    pub source_id: String,
    #[source]
    pub cause: Box<dyn StdError + Send + Sync + 'static>,
}

impl SourceUnavailable {
    pub fn new(
        source_id: impl Into<String>,
        cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            cause: cause.into(),
        }
    }
}
