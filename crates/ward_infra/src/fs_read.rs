use std::path::Path;

use ward_fs::WardFS;
use ward_services::FileReaderInfra;

/// Low-level file read service.
pub struct WardFileReadService;

impl WardFileReadService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WardFileReadService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FileReaderInfra for WardFileReadService {
    async fn read_utf8(&self, path: &Path) -> anyhow::Result<String> {
        WardFS::read_utf8(path).await
    }

    async fn read_capped(
        &self,
        path: &Path,
        max_chars: usize,
    ) -> anyhow::Result<(String, bool)> {
        WardFS::read_capped(path, max_chars).await
    }
}
