use std::path::Path;

use ward_fs::WardFS;
use ward_services::{FileDirectoryInfra, FileInfoInfra, FileTransferInfra};

/// Metadata, directory and transfer primitives over the real filesystem.
pub struct WardFileMetaService;

impl WardFileMetaService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WardFileMetaService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FileInfoInfra for WardFileMetaService {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(WardFS::exists(path))
    }

    async fn is_file(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(WardFS::is_file(path))
    }

    async fn file_size(&self, path: &Path) -> anyhow::Result<u64> {
        WardFS::file_size(path).await
    }
}

#[async_trait::async_trait]
impl FileDirectoryInfra for WardFileMetaService {
    async fn create_dirs(&self, path: &Path) -> anyhow::Result<()> {
        WardFS::create_dir_all(path).await
    }
}

#[async_trait::async_trait]
impl FileTransferInfra for WardFileMetaService {
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        WardFS::rename(from, to).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> anyhow::Result<u64> {
        WardFS::copy(from, to).await
    }
}
