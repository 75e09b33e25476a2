pub mod config;
pub mod error;
pub mod inference;
pub mod logger;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod prompt;

pub use config::{Config, HuggingFaceConfig};
pub use error::{BlogImageError, FaultHint, Result};
pub use inference::{HuggingFaceClient, TextToImage};
pub use models::{GenerationReport, GenerationRequest, ImagePayload};
pub use output::OutputLayout;
pub use pipeline::{execute, RunOptions, Stage};
