use serde::Serialize;

use crate::config::DEFAULT_MODEL_ID;
use crate::error::{BlogImageError, Result};

pub const PNG_EXTENSION: &str = ".png";

/// Everything one run needs, resolved from CLI flags and the environment.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub title: String,
    pub content: String,
    pub output_filename: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model_id: String,
}

impl GenerationRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        output_filename: &str,
        api_key: impl Into<String>,
        model_id: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BlogImageError::ConfigError(
                "HuggingFace API token must not be empty".into(),
            ));
        }

        Ok(Self {
            title: title.into(),
            content: content.into(),
            output_filename: normalize_filename(output_filename),
            api_key,
            model_id: model_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        })
    }
}

/// Appends `.png` unless the name already ends with it (case-sensitive).
pub fn normalize_filename(filename: &str) -> String {
    if filename.ends_with(PNG_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, PNG_EXTENSION)
    }
}
