use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{Clearance, ConsentGate, ArchiveInfra, EnvironmentInfra, FileInfoInfra, UserInfra};

#[derive(Debug, PartialEq, Eq)]
pub struct ArchiveCreateOutput {
    pub path: String,
    pub entries: usize,
}

/// Packs files into a `.tar.gz` archive behind the consent gate.
pub struct WardArchiveCreate<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardArchiveCreate<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + ArchiveInfra + EnvironmentInfra + UserInfra> WardArchiveCreate<F> {
    pub async fn pack(
        &self,
        sources: Vec<String>,
        destination: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<ArchiveCreateOutput>> {
        let target = Path::new(&destination);
        assert_absolute_path(target)?;

        if sources.is_empty() {
            bail!("Nothing to archive: no source files given");
        }
        let source_paths: Vec<PathBuf> = sources.iter().map(PathBuf::from).collect();
        for source in &source_paths {
            assert_absolute_path(source)?;
            if !self.infra.is_file(source).await? {
                bail!("File not found: {}", source.display());
            }
        }

        let dest_exists = self.infra.is_file(target).await?;
        let mut request = OperationRequest::new(OperationKind::Compress, &destination)?;
        request.skip_confirm = skip_confirm;

        let mut source = PreviewSource::default()
            .target_exists(dest_exists)
            .item_count(source_paths.len());
        if dest_exists {
            source = source.size_bytes(self.infra.file_size(target).await?);
        }
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                let entries = self.infra.pack(&source_paths, target).await?;
                tracing::info!(path = %destination, entries, "Archive created");
                Ok(ConsentOutcome::Completed(ArchiveCreateOutput {
                    path: destination,
                    entries,
                }))
            }
        }
    }
}
