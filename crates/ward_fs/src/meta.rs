use std::path::Path;

use anyhow::{Context, Result};

impl crate::WardFS {
    pub fn exists<T: AsRef<Path>>(path: T) -> bool {
        path.as_ref().exists()
    }

    pub fn is_file<T: AsRef<Path>>(path: T) -> bool {
        path.as_ref().is_file()
    }

    pub async fn file_size<T: AsRef<Path>>(path: T) -> Result<u64> {
        let metadata = tokio::fs::metadata(path.as_ref())
            .await
            .with_context(|| format!("Failed to read metadata of {}", path.as_ref().display()))?;
        Ok(metadata.len())
    }

    pub async fn create_dir_all<T: AsRef<Path>>(path: T) -> Result<()> {
        tokio::fs::create_dir_all(path.as_ref())
            .await
            .with_context(|| format!("Failed to create directory {}", path.as_ref().display()))
    }

    pub async fn remove_file<T: AsRef<Path>>(path: T) -> Result<()> {
        tokio::fs::remove_file(path.as_ref())
            .await
            .with_context(|| format!("Failed to remove file {}", path.as_ref().display()))
    }

    pub async fn rename<F: AsRef<Path>, T: AsRef<Path>>(from: F, to: T) -> Result<()> {
        tokio::fs::rename(from.as_ref(), to.as_ref())
            .await
            .with_context(|| {
                format!(
                    "Failed to move {} to {}",
                    from.as_ref().display(),
                    to.as_ref().display()
                )
            })
    }

    pub async fn copy<F: AsRef<Path>, T: AsRef<Path>>(from: F, to: T) -> Result<u64> {
        tokio::fs::copy(from.as_ref(), to.as_ref())
            .await
            .with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    from.as_ref().display(),
                    to.as_ref().display()
                )
            })
    }
}
