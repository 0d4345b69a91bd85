use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::bail;
use bytes::Bytes;
use ward_domain::{EnvironmentSignal, PreviewInfo};

use crate::{
    ArchiveInfra, EnvironmentInfra, FileDirectoryInfra, FileInfoInfra, FileReaderInfra,
    FileRemoverInfra, FileTransferInfra, FileWriterInfra, UserInfra,
};

#[derive(Default)]
struct State {
    signal: EnvironmentSignal,
    answers: VecDeque<bool>,
    prompts: Vec<String>,
    previews: Vec<PreviewInfo>,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    archive_entries: usize,
}

/// In-memory infra shared by service tests: a controllable environment
/// signal, a scripted prompter, and a HashMap filesystem. Clones share
/// state, so tests can keep a handle while a service owns another.
#[derive(Clone, Default)]
pub struct MockInfra {
    state: Arc<Mutex<State>>,
}

impl MockInfra {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_signal(self, signal: EnvironmentSignal) -> Self {
        self.state().signal = signal;
        self
    }

    pub fn with_answers(self, answers: Vec<bool>) -> Self {
        self.state().answers = answers.into();
        self
    }

    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.state()
            .files
            .insert(PathBuf::from(path), contents.as_bytes().to_vec());
        self
    }

    pub fn with_archive_entries(self, count: usize) -> Self {
        self.state().archive_entries = count;
        self
    }

    pub fn prompted_descriptions(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    pub fn prompted_previews(&self) -> Vec<PreviewInfo> {
        self.state().previews.clone()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.state()
            .files
            .get(Path::new(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.state().files.contains_key(Path::new(path))
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.state().dirs.contains(Path::new(path))
    }
}

impl EnvironmentInfra for MockInfra {
    fn probe(&self) -> EnvironmentSignal {
        self.state().signal
    }

    fn get_env_var(&self, _key: &str) -> Option<String> {
        None
    }
}

#[async_trait::async_trait]
impl UserInfra for MockInfra {
    async fn confirm_operation(
        &self,
        description: &str,
        preview: &PreviewInfo,
    ) -> anyhow::Result<bool> {
        let mut state = self.state();
        state.prompts.push(description.to_string());
        state.previews.push(preview.clone());
        match state.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("prompter invoked without a scripted answer"),
        }
    }
}

#[async_trait::async_trait]
impl FileReaderInfra for MockInfra {
    async fn read_utf8(&self, path: &Path) -> anyhow::Result<String> {
        match self.state().files.get(path) {
            Some(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            None => bail!("File not found: {}", path.display()),
        }
    }

    async fn read_capped(
        &self,
        path: &Path,
        max_chars: usize,
    ) -> anyhow::Result<(String, bool)> {
        let content = self.read_utf8(path).await?;
        let truncated = content.chars().count() > max_chars;
        Ok((content.chars().take(max_chars).collect(), truncated))
    }
}

#[async_trait::async_trait]
impl FileWriterInfra for MockInfra {
    async fn write(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        self.state().files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn append(&self, path: &Path, contents: Bytes) -> anyhow::Result<()> {
        let mut state = self.state();
        match state.files.get_mut(path) {
            Some(existing) => {
                existing.extend_from_slice(&contents);
                Ok(())
            }
            None => bail!("File not found: {}", path.display()),
        }
    }
}

#[async_trait::async_trait]
impl FileRemoverInfra for MockInfra {
    async fn remove(&self, path: &Path) -> anyhow::Result<()> {
        match self.state().files.remove(path) {
            Some(_) => Ok(()),
            None => bail!("File not found: {}", path.display()),
        }
    }
}

#[async_trait::async_trait]
impl FileInfoInfra for MockInfra {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool> {
        let state = self.state();
        Ok(state.files.contains_key(path) || state.dirs.contains(path))
    }

    async fn is_file(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(self.state().files.contains_key(path))
    }

    async fn file_size(&self, path: &Path) -> anyhow::Result<u64> {
        match self.state().files.get(path) {
            Some(bytes) => Ok(bytes.len() as u64),
            None => bail!("File not found: {}", path.display()),
        }
    }
}

#[async_trait::async_trait]
impl FileDirectoryInfra for MockInfra {
    async fn create_dirs(&self, path: &Path) -> anyhow::Result<()> {
        self.state().dirs.insert(path.to_path_buf());
        Ok(())
    }
}

#[async_trait::async_trait]
impl FileTransferInfra for MockInfra {
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        let mut state = self.state();
        match state.files.remove(from) {
            Some(bytes) => {
                state.files.insert(to.to_path_buf(), bytes);
                Ok(())
            }
            None => bail!("File not found: {}", from.display()),
        }
    }

    async fn copy(&self, from: &Path, to: &Path) -> anyhow::Result<u64> {
        let mut state = self.state();
        match state.files.get(from).cloned() {
            Some(bytes) => {
                let size = bytes.len() as u64;
                state.files.insert(to.to_path_buf(), bytes);
                Ok(size)
            }
            None => bail!("File not found: {}", from.display()),
        }
    }
}

#[async_trait::async_trait]
impl ArchiveInfra for MockInfra {
    async fn pack(&self, sources: &[PathBuf], destination: &Path) -> anyhow::Result<usize> {
        self.state()
            .files
            .insert(destination.to_path_buf(), b"archive".to_vec());
        Ok(sources.len())
    }

    async fn unpack(&self, archive: &Path, destination: &Path) -> anyhow::Result<usize> {
        let mut state = self.state();
        if !state.files.contains_key(archive) {
            bail!("File not found: {}", archive.display());
        }
        state.dirs.insert(destination.to_path_buf());
        Ok(state.archive_entries)
    }

    async fn count_entries(&self, archive: &Path) -> anyhow::Result<usize> {
        let state = self.state();
        if !state.files.contains_key(archive) {
            bail!("File not found: {}", archive.display());
        }
        Ok(state.archive_entries)
    }
}
