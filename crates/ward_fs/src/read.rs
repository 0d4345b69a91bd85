use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

impl crate::WardFS {
    pub async fn read_utf8<T: AsRef<Path>>(path: T) -> Result<String> {
        tokio::fs::read_to_string(path.as_ref())
            .await
            .with_context(|| format!("Failed to read file {}", path.as_ref().display()))
    }

    /// Reads at most `max_chars` characters from the start of a file.
    ///
    /// Returns the excerpt and whether the file held more than was read.
    /// Only `max_chars + 1` bytes are pulled off disk, so previewing a
    /// multi-gigabyte target stays cheap.
    pub async fn read_capped<T: AsRef<Path>>(path: T, max_chars: usize) -> Result<(String, bool)> {
        let path_ref = path.as_ref();
        let file = tokio::fs::File::open(path_ref)
            .await
            .with_context(|| format!("Failed to open file {}", path_ref.display()))?;

        let mut buffer = Vec::with_capacity(max_chars + 1);
        file.take(max_chars as u64 + 1)
            .read_to_end(&mut buffer)
            .await
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?;

        let text = String::from_utf8_lossy(&buffer);
        let truncated = text.chars().count() > max_chars;
        let excerpt: String = text.chars().take(max_chars).collect();

        Ok((excerpt, truncated))
    }
}
