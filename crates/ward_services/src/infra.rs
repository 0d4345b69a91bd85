use std::path::{Path, PathBuf};

use bytes::Bytes;
use ward_domain::{EnvironmentSignal, PreviewInfo};

/// Access to the ambient execution context.
pub trait EnvironmentInfra: Send + Sync {
    /// Recomputed on every call; implementations must not cache the result,
    /// since terminal attachment and the bypass variable can change while
    /// the process runs.
    fn probe(&self) -> EnvironmentSignal;

    fn get_env_var(&self, key: &str) -> Option<String>;
}

/// A service for reading files from the filesystem.
///
/// An abstraction over file reading so services can be tested against an
/// in-memory filesystem.
#[async_trait::async_trait]
pub trait FileReaderInfra: Send + Sync {
    /// Reads the whole file as a UTF-8 string.
    async fn read_utf8(&self, path: &Path) -> anyhow::Result<String>;

    /// Reads at most `max_chars` characters from the start of the file.
    /// Returns the excerpt and whether the file held more than was read.
    async fn read_capped(&self, path: &Path, max_chars: usize)
    -> anyhow::Result<(String, bool)>;
}

#[async_trait::async_trait]
pub trait FileWriterInfra: Send + Sync {
    /// Writes the content of a file at the specified path, creating parent
    /// directories as needed.
    async fn write(&self, path: &Path, contents: Bytes) -> anyhow::Result<()>;

    /// Appends to an existing file.
    async fn append(&self, path: &Path, contents: Bytes) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait FileRemoverInfra: Send + Sync {
    /// Removes a file at the specified path.
    async fn remove(&self, path: &Path) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait FileInfoInfra: Send + Sync {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool>;
    async fn is_file(&self, path: &Path) -> anyhow::Result<bool>;
    async fn file_size(&self, path: &Path) -> anyhow::Result<u64>;
}

#[async_trait::async_trait]
pub trait FileDirectoryInfra: Send + Sync {
    async fn create_dirs(&self, path: &Path) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait FileTransferInfra: Send + Sync {
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()>;
    async fn copy(&self, from: &Path, to: &Path) -> anyhow::Result<u64>;
}

/// Packing and unpacking of `.tar.gz` archives.
#[async_trait::async_trait]
pub trait ArchiveInfra: Send + Sync {
    /// Packs the given files into `destination`; returns the entry count.
    async fn pack(&self, sources: &[PathBuf], destination: &Path) -> anyhow::Result<usize>;

    /// Unpacks `archive` under `destination`; returns the entry count.
    async fn unpack(&self, archive: &Path, destination: &Path) -> anyhow::Result<usize>;

    /// Counts entries without unpacking anything.
    async fn count_entries(&self, archive: &Path) -> anyhow::Result<usize>;
}

#[async_trait::async_trait]
pub trait UserInfra: Send + Sync {
    /// Blocks for a yes/no answer to the given operation description.
    ///
    /// Must only be called when the probe reports an interactive terminal.
    async fn confirm_operation(
        &self,
        description: &str,
        preview: &PreviewInfo,
    ) -> anyhow::Result<bool>;
}
