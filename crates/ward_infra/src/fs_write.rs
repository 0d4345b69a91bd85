use std::path::Path;

use bytes::Bytes;
use ward_fs::WardFS;
use ward_services::FileWriterInfra;

/// Low-level file write service.
///
/// Creates missing parent directories before writing; consent and preview
/// coordination happen at the service layer.
pub struct WardFileWriteService;

impl WardFileWriteService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WardFileWriteService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FileWriterInfra for WardFileWriteService {
    async fn write(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        WardFS::write(path, contents).await
    }

    async fn append(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        WardFS::append(path, contents).await
    }
}
