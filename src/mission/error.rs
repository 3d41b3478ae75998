use thiserror::Error;

/// Failures at the content boundary. All of them degrade to the fallback
/// mission or to silent narration; none is fatal to a run.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content provider unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed mission payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid mission: {0}")]
    Invalid(&'static str),
    #[error("request timed out after {0:.1}s")]
    TimedOut(f32),
}
