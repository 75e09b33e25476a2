use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::HuggingFaceConfig,
    error::{BlogImageError, Result},
    inference::TextToImage,
    models::ImagePayload,
};

#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Value,
}

impl HuggingFaceClient {
    pub fn new(config: &HuggingFaceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url().to_string(),
        }
    }

    fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url, model_id)
    }
}

#[async_trait]
impl TextToImage for HuggingFaceClient {
    async fn text_to_image(
        &self,
        prompt: &str,
        model_id: &str,
        api_key: &str,
    ) -> Result<ImagePayload> {
        let url = self.model_url(model_id);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header(header::ACCEPT, "image/png")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| {
                BlogImageError::RequestError(format!("HuggingFace request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlogImageError::RequestError(format!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
                error_message(&body)
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BlogImageError::ResponseError(e.to_string()))?;

        payload_from_response(content_type.as_deref(), bytes.to_vec())
    }
}

/// Pulls the `error` field out of a JSON error body, falling back to the raw
/// text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Value::String(message),
        }) => message,
        Ok(ErrorBody {
            error: Value::Array(messages),
        }) => messages
            .iter()
            .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
            .collect::<Vec<_>>()
            .join("; "),
        Ok(ErrorBody { error }) => error.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn payload_from_response(content_type: Option<&str>, bytes: Vec<u8>) -> Result<ImagePayload> {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if !mime.starts_with("image/") {
        let shown = if mime.is_empty() { "<missing content-type>" } else { &mime };
        return Err(BlogImageError::UnexpectedImageType(shown.to_string()));
    }

    match image::load_from_memory(&bytes) {
        Ok(image) => Ok(ImagePayload::Structured(image)),
        Err(e) => {
            log::debug!("Could not decode {} payload ({}), keeping raw bytes", mime, e);
            Ok(ImagePayload::Raw(bytes))
        }
    }
}
