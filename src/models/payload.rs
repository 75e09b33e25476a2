use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::{BlogImageError, Result};

/// What the inference backend handed back.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    /// A decoded image that still needs PNG encoding.
    Structured(DynamicImage),
    /// Bytes that are written as-is.
    Raw(Vec<u8>),
}

impl ImagePayload {
    pub fn into_png_bytes(self) -> Result<Vec<u8>> {
        match self {
            ImagePayload::Structured(image) => {
                let mut buffer = Cursor::new(Vec::new());
                image
                    .write_to(&mut buffer, ImageFormat::Png)
                    .map_err(|e| BlogImageError::EncodeError(e.to_string()))?;
                Ok(buffer.into_inner())
            }
            ImagePayload::Raw(bytes) => Ok(bytes),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub size_on_disk: u64,
    pub png_signature_valid: bool,
}

impl GenerationReport {
    pub fn size_kb(&self) -> f64 {
        self.bytes_written as f64 / 1024.0
    }
}
