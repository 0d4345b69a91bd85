use std::path::Path;

use ward_fs::WardFS;
use ward_services::FileRemoverInfra;

/// Low-level file removal service.
pub struct WardFileRemoveService;

impl WardFileRemoveService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WardFileRemoveService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FileRemoverInfra for WardFileRemoveService {
    async fn remove(&self, path: &Path) -> anyhow::Result<()> {
        WardFS::remove_file(path).await
    }
}
