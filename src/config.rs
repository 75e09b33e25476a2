use std::env;
use std::path::PathBuf;

use crate::error::{BlogImageError, Result};

pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
pub const INFERENCE_URL_ENV: &str = "HUGGINGFACE_INFERENCE_URL";
pub const REPO_ROOT_ENV: &str = "BLOG_IMAGE_REPO_ROOT";

pub const DEFAULT_MODEL_ID: &str = "black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface: HuggingFaceConfig,
    pub repo_root: Option<PathBuf>,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        HuggingFaceConfig {
            api_key: None,
            model_id: None,
            base_url: None,
        }
    }
}

impl HuggingFaceConfig {
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV).ok();
        let base_url = env::var(INFERENCE_URL_ENV).ok();

        HuggingFaceConfig {
            api_key,
            model_id: None,
            base_url,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_INFERENCE_URL)
            .trim_end_matches('/')
    }
}

impl Config {
    pub fn from_env() -> Self {
        let repo_root = env::var(REPO_ROOT_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Config {
            huggingface: HuggingFaceConfig::from_env(),
            repo_root,
        }
    }

    pub fn with_repo_root(mut self, repo_root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(repo_root.into());
        self
    }
}

/// An explicitly passed credential is used as-is, even when empty; the
/// environment value only fills in when the flag was not given at all.
pub fn resolve_credential(explicit: Option<String>, env_value: Option<String>) -> Result<String> {
    let api_key = match explicit {
        Some(value) => value,
        None => env_value.unwrap_or_default(),
    };

    if api_key.is_empty() {
        return Err(BlogImageError::ConfigError(format!(
            "HuggingFace API token not provided. Set {} environment variable or pass --api-key parameter.",
            API_KEY_ENV
        )));
    }
    Ok(api_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_credential_wins() {
        let key = resolve_credential(Some("hf_cli".to_string()), Some("hf_env".to_string()))
            .unwrap();
        assert_eq!(key, "hf_cli");
    }

    #[test]
    fn test_env_used_when_flag_absent() {
        let key = resolve_credential(None, Some("hf_env".to_string())).unwrap();
        assert_eq!(key, "hf_env");
    }

    #[test]
    fn test_explicit_empty_does_not_fall_back() {
        let err = resolve_credential(Some(String::new()), Some("hf_env".to_string())).unwrap_err();
        assert!(matches!(err, BlogImageError::ConfigError(_)));
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let err = resolve_credential(None, None).unwrap_err();
        assert!(matches!(err, BlogImageError::ConfigError(_)));
        assert!(err.to_string().contains(API_KEY_ENV));

        let err = resolve_credential(None, Some(String::new())).unwrap_err();
        assert!(matches!(err, BlogImageError::ConfigError(_)));
    }

    #[test]
    fn test_whitespace_key_is_passed_through() {
        assert_eq!(resolve_credential(Some(" ".to_string()), None).unwrap(), " ");
    }

    #[test]
    fn test_huggingface_defaults() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.model_id(), DEFAULT_MODEL_ID);
        assert_eq!(config.base_url(), DEFAULT_INFERENCE_URL);

        let config = config
            .with_model("stabilityai/stable-diffusion-xl-base-1.0")
            .with_base_url("http://127.0.0.1:9000/models/");
        assert_eq!(config.model_id(), "stabilityai/stable-diffusion-xl-base-1.0");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/models");
    }
}
