use thiserror::Error;

/// Failures the effects layer can observe. None of them are fatal: callers
/// log and carry on with the effect muted or skipped.
#[derive(Debug, Error)]
pub enum FxError {
    #[error("audio output unavailable: {0}")]
    AudioUnavailable(String),
    #[error("audio handle already closed")]
    AudioClosed,
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("invalid effects config: {0}")]
    InvalidConfig(&'static str),
}

pub type FxResult<T> = Result<T, FxError>;
