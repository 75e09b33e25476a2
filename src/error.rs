use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogImageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Unexpected image type: {0}")]
    UnexpectedImageType(String),
    #[error("Encode error: {0}")]
    EncodeError(String),
    #[error("I/O error at {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Verification error: {0}")]
    VerificationError(String),
}

impl BlogImageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BlogImageError::IoError {
            path: path.into(),
            source,
        }
    }

    /// True for faults raised while talking to, or decoding the answer of,
    /// the inference backend.
    pub fn is_remote_fault(&self) -> bool {
        matches!(
            self,
            BlogImageError::RequestError(_)
                | BlogImageError::ResponseError(_)
                | BlogImageError::UnexpectedImageType(_)
                | BlogImageError::EncodeError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BlogImageError>;

/// Known categories of inference-service failures, recognised from the
/// service's error prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultHint {
    Unauthorized,
    ModelLoading,
    RateLimited,
}

impl FaultHint {
    /// Case-insensitive substring match; the first matching category wins.
    pub fn classify(message: &str) -> Option<Self> {
        let message = message.to_lowercase();
        if message.contains("unauthorized") || message.contains("401") {
            Some(FaultHint::Unauthorized)
        } else if message.contains("model is currently loading") || message.contains("503") {
            Some(FaultHint::ModelLoading)
        } else if message.contains("rate limit") || message.contains("429") {
            Some(FaultHint::RateLimited)
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FaultHint::Unauthorized => "Unauthorized",
            FaultHint::ModelLoading => "Model Loading",
            FaultHint::RateLimited => "Rate Limit",
        }
    }

    pub fn advice(&self) -> &'static [&'static str] {
        match self {
            FaultHint::Unauthorized => &[
                "Your API token is invalid or has expired.",
                "Please generate a new token at: https://huggingface.co/settings/tokens",
            ],
            FaultHint::ModelLoading => &[
                "The model is currently loading. Please wait and try again in a few moments.",
            ],
            FaultHint::RateLimited => {
                &["You've exceeded the rate limit. Please wait a few minutes and try again."]
            }
        }
    }
}
