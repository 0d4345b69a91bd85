use std::fs::File;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, bail};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tar::{Archive, Builder, EntryType};
use ward_services::ArchiveInfra;

/// `.tar.gz` packing and unpacking.
///
/// Extraction refuses symlinks, hardlinks, device nodes, absolute entry
/// paths and `..` components instead of trying to sanitize them. The
/// blocking tar/gzip work runs on the blocking thread pool.
pub struct WardArchiveService;

impl WardArchiveService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WardArchiveService {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular files, directories, and tar metadata headers only.
fn is_safe_entry_type(entry_type: EntryType) -> bool {
    matches!(
        entry_type,
        EntryType::Regular
            | EntryType::Directory
            | EntryType::GNULongName
            | EntryType::XHeader
            | EntryType::XGlobalHeader
    )
}

/// Rejects entry paths that could land outside the destination.
fn validate_entry_path(path: &Path) -> anyhow::Result<()> {
    if path.is_absolute() {
        bail!("Archive entry has an absolute path: {}", path.display());
    }

    for component in path.components() {
        if matches!(
            component,
            Component::ParentDir | Component::Prefix(_) | Component::RootDir
        ) {
            bail!("Archive entry escapes the destination: {}", path.display());
        }
    }

    Ok(())
}

fn pack_blocking(sources: &[PathBuf], destination: &Path) -> anyhow::Result<usize> {
    let file = File::create(destination)
        .with_context(|| format!("Failed to create archive {}", destination.display()))?;
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));

    let mut entries = 0usize;
    for source in sources {
        let name = source
            .file_name()
            .with_context(|| format!("Source has no file name: {}", source.display()))?;
        builder
            .append_path_with_name(source, name)
            .with_context(|| format!("Failed to add {} to archive", source.display()))?;
        entries += 1;
    }

    let encoder = builder
        .into_inner()
        .with_context(|| format!("Failed to finalize archive {}", destination.display()))?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finish compression of {}", destination.display()))?;

    Ok(entries)
}

fn unpack_blocking(archive: &Path, destination: &Path) -> anyhow::Result<usize> {
    std::fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create directory {}", destination.display()))?;

    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive {}", archive.display()))?;
    let mut tar = Archive::new(GzDecoder::new(file));

    let mut unpacked = 0usize;
    for entry in tar
        .entries()
        .with_context(|| format!("Failed to read entries of {}", archive.display()))?
    {
        let mut entry = entry
            .with_context(|| format!("Failed to read entry of {}", archive.display()))?;

        let entry_type = entry.header().entry_type();
        if !is_safe_entry_type(entry_type) {
            bail!("Refusing unsafe archive entry type: {entry_type:?}");
        }

        let entry_path = entry
            .path()
            .with_context(|| format!("Failed to read entry path in {}", archive.display()))?
            .into_owned();
        validate_entry_path(&entry_path)?;

        if entry
            .unpack_in(destination)
            .with_context(|| format!("Failed to unpack {}", entry_path.display()))?
        {
            unpacked += 1;
        }
    }

    Ok(unpacked)
}

fn count_blocking(archive: &Path) -> anyhow::Result<usize> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive {}", archive.display()))?;
    let mut tar = Archive::new(GzDecoder::new(file));

    let mut count = 0usize;
    for entry in tar
        .entries()
        .with_context(|| format!("Failed to read entries of {}", archive.display()))?
    {
        let entry = entry
            .with_context(|| format!("Failed to read entry of {}", archive.display()))?;
        if matches!(
            entry.header().entry_type(),
            EntryType::Regular | EntryType::Directory
        ) {
            count += 1;
        }
    }

    Ok(count)
}

#[async_trait::async_trait]
impl ArchiveInfra for WardArchiveService {
    async fn pack(&self, sources: &[PathBuf], destination: &Path) -> anyhow::Result<usize> {
        let sources = sources.to_vec();
        let destination = destination.to_path_buf();
        tokio::task::spawn_blocking(move || pack_blocking(&sources, &destination)).await?
    }

    async fn unpack(&self, archive: &Path, destination: &Path) -> anyhow::Result<usize> {
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();
        tokio::task::spawn_blocking(move || unpack_blocking(&archive, &destination)).await?
    }

    async fn count_entries(&self, archive: &Path) -> anyhow::Result<usize> {
        let archive = archive.to_path_buf();
        tokio::task::spawn_blocking(move || count_blocking(&archive)).await?
    }
}
