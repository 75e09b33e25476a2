use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{
    error::{BlogImageError, Result},
    models::GenerationReport,
};

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Single write; an existing file is truncated.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| BlogImageError::io(path, e))
}

/// Stats `path` after a write and returns its size on disk.
pub fn verify_written(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        Ok(_) => Err(BlogImageError::VerificationError(format!(
            "{} is not a regular file",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(BlogImageError::VerificationError(
            format!("File was not created successfully: {}", path.display()),
        )),
        Err(e) => Err(BlogImageError::io(path, e)),
    }
}

pub fn write_and_verify(path: &Path, bytes: &[u8]) -> Result<GenerationReport> {
    write_image(path, bytes)?;
    let size_on_disk = verify_written(path)?;

    Ok(GenerationReport {
        output_path: path.to_path_buf(),
        bytes_written: bytes.len(),
        size_on_disk,
        png_signature_valid: has_png_signature(bytes),
    })
}
