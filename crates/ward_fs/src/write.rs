use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;

impl crate::WardFS {
    /// Writes bytes, creating missing parent directories first.
    pub async fn write<T: AsRef<Path>, C: AsRef<[u8]>>(path: T, contents: C) -> Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent()
            && !parent.as_os_str().is_empty()
        {
            Self::create_dir_all(parent).await?;
        }

        tokio::fs::write(path_ref, contents.as_ref())
            .await
            .with_context(|| format!("Failed to write file {}", path_ref.display()))
    }

    /// Appends bytes to an existing file without touching the rest of it.
    pub async fn append<T: AsRef<Path>, C: AsRef<[u8]>>(path: T, contents: C) -> Result<()> {
        let path_ref = path.as_ref();
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(path_ref)
            .await
            .with_context(|| format!("Failed to open file for append {}", path_ref.display()))?;

        file.write_all(contents.as_ref())
            .await
            .with_context(|| format!("Failed to append to file {}", path_ref.display()))
    }
}
