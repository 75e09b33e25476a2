use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BlogImageError, Result};

const POSTS_DIR: &str = "posts";
const IMAGES_DIR: &str = "images";

/// Where generated images land: `<repo-root>/posts/images/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    repo_root: PathBuf,
}

impl OutputLayout {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// The repo root is the parent of the directory holding the tool.
    pub fn from_tool_dir(tool_dir: &Path) -> Self {
        let repo_root = match tool_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => tool_dir.join(".."),
        };
        Self::new(repo_root)
    }

    pub fn from_current_exe() -> Result<Self> {
        let exe = env::current_exe().map_err(|e| BlogImageError::io("<current executable>", e))?;
        let tool_dir = exe.parent().ok_or_else(|| {
            BlogImageError::ConfigError(format!(
                "cannot determine the directory of {}",
                exe.display()
            ))
        })?;
        Ok(Self::from_tool_dir(tool_dir))
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.repo_root.join(POSTS_DIR).join(IMAGES_DIR)
    }

    /// Returns the absolute path for `filename`, creating the image directory
    /// (and any missing parents) first.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let mut dir = self.images_dir();
        if dir.is_relative() {
            let cwd = env::current_dir().map_err(|e| BlogImageError::io(".", e))?;
            dir = cwd.join(dir);
        }

        fs::create_dir_all(&dir).map_err(|e| BlogImageError::io(&dir, e))?;
        Ok(dir.join(filename))
    }
}
