use thiserror::Error;

/// Failure modes of the extraction pipeline.
///
/// Every failure is surfaced to the immediate caller as one of these
/// variants with a human-readable message. The pipeline performs no retry,
/// no fallback model and no partial recovery.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input failed pre-flight validation and never reached the model.
    #[error("input rejected: {0}")]
    RejectedInput(String),

    /// The model call itself failed (network, quota, auth). The underlying
    /// message is preserved verbatim.
    #[error("model call failed: {0}")]
    ModelFailure(String),

    /// The model returned no structured output where one was mandatory.
    #[error("model returned no structured output")]
    EmptyResponse,

    /// The model returned structured output missing a mandatory field.
    #[error("model output missing required field: {0}")]
    InvalidShape(String),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
