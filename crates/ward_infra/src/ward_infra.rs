use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use ward_domain::{EnvironmentSignal, PreviewInfo};
use ward_services::{
    ArchiveInfra, EnvironmentInfra, FileDirectoryInfra, FileInfoInfra, FileReaderInfra,
    FileRemoverInfra, FileTransferInfra, FileWriterInfra, UserInfra,
};

use crate::archive::WardArchiveService;
use crate::console::WardConsole;
use crate::env::WardEnvironmentInfra;
use crate::fs_meta::WardFileMetaService;
use crate::fs_read::WardFileReadService;
use crate::fs_remove::WardFileRemoveService;
use crate::fs_write::WardFileWriteService;

/// Production infra: everything the operation adapters need, in one value.
///
/// Hand an `Arc<WardInfra>` to any of the `Ward*` services; tests swap in
/// their own infra instead.
#[derive(Clone)]
pub struct WardInfra {
    environment_service: Arc<WardEnvironmentInfra>,
    console_service: Arc<WardConsole>,
    file_read_service: Arc<WardFileReadService>,
    file_write_service: Arc<WardFileWriteService>,
    file_remove_service: Arc<WardFileRemoveService>,
    file_meta_service: Arc<WardFileMetaService>,
    archive_service: Arc<WardArchiveService>,
}

impl WardInfra {
    pub fn new() -> Self {
        Self {
            environment_service: Arc::new(WardEnvironmentInfra::new()),
            console_service: Arc::new(WardConsole::new()),
            file_read_service: Arc::new(WardFileReadService::new()),
            file_write_service: Arc::new(WardFileWriteService::new()),
            file_remove_service: Arc::new(WardFileRemoveService::new()),
            file_meta_service: Arc::new(WardFileMetaService::new()),
            archive_service: Arc::new(WardArchiveService::new()),
        }
    }
}

impl Default for WardInfra {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentInfra for WardInfra {
    fn probe(&self) -> EnvironmentSignal {
        self.environment_service.probe()
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        self.environment_service.get_env_var(key)
    }
}

#[async_trait::async_trait]
impl UserInfra for WardInfra {
    async fn confirm_operation(
        &self,
        description: &str,
        preview: &PreviewInfo,
    ) -> anyhow::Result<bool> {
        self.console_service
            .confirm_operation(description, preview)
            .await
    }
}

#[async_trait::async_trait]
impl FileReaderInfra for WardInfra {
    async fn read_utf8(&self, path: &Path) -> anyhow::Result<String> {
        self.file_read_service.read_utf8(path).await
    }

    async fn read_capped(
        &self,
        path: &Path,
        max_chars: usize,
    ) -> anyhow::Result<(String, bool)> {
        self.file_read_service.read_capped(path, max_chars).await
    }
}

#[async_trait::async_trait]
impl FileWriterInfra for WardInfra {
    async fn write(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        self.file_write_service.write(path, contents).await
    }

    async fn append(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        self.file_write_service.append(path, contents).await
    }
}

#[async_trait::async_trait]
impl FileRemoverInfra for WardInfra {
    async fn remove(&self, path: &Path) -> anyhow::Result<()> {
        self.file_remove_service.remove(path).await
    }
}

#[async_trait::async_trait]
impl FileInfoInfra for WardInfra {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool> {
        self.file_meta_service.exists(path).await
    }

    async fn is_file(&self, path: &Path) -> anyhow::Result<bool> {
        self.file_meta_service.is_file(path).await
    }

    async fn file_size(&self, path: &Path) -> anyhow::Result<u64> {
        self.file_meta_service.file_size(path).await
    }
}

#[async_trait::async_trait]
impl FileDirectoryInfra for WardInfra {
    async fn create_dirs(&self, path: &Path) -> anyhow::Result<()> {
        self.file_meta_service.create_dirs(path).await
    }
}

#[async_trait::async_trait]
impl FileTransferInfra for WardInfra {
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        self.file_meta_service.rename(from, to).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> anyhow::Result<u64> {
        self.file_meta_service.copy(from, to).await
    }
}

#[async_trait::async_trait]
impl ArchiveInfra for WardInfra {
    async fn pack(&self, sources: &[PathBuf], destination: &Path) -> anyhow::Result<usize> {
        self.archive_service.pack(sources, destination).await
    }

    async fn unpack(&self, archive: &Path, destination: &Path) -> anyhow::Result<usize> {
        self.archive_service.unpack(archive, destination).await
    }

    async fn count_entries(&self, archive: &Path) -> anyhow::Result<usize> {
        self.archive_service.count_entries(archive).await
    }
}
