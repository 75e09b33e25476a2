pub mod huggingface;

use async_trait::async_trait;

use crate::{error::Result, models::ImagePayload};

pub use huggingface::HuggingFaceClient;

/// A remote text-to-image model, called once per run.
#[async_trait]
pub trait TextToImage: Send + Sync {
    async fn text_to_image(
        &self,
        prompt: &str,
        model_id: &str,
        api_key: &str,
    ) -> Result<ImagePayload>;
}
