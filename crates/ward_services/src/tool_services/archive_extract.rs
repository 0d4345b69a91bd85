use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{Clearance, ConsentGate, ArchiveInfra, EnvironmentInfra, FileInfoInfra, UserInfra};

#[derive(Debug, PartialEq, Eq)]
pub struct ArchiveExtractOutput {
    pub destination: String,
    pub entries: usize,
}

/// Unpacks a `.tar.gz` archive behind the consent gate.
///
/// The mutated path is the destination directory, so the request targets
/// it; the archive itself is only read. The entry count shown in the
/// preview comes from scanning the archive index, not from unpacking.
pub struct WardArchiveExtract<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardArchiveExtract<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + ArchiveInfra + EnvironmentInfra + UserInfra> WardArchiveExtract<F> {
    pub async fn unpack(
        &self,
        archive: String,
        destination: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<ArchiveExtractOutput>> {
        let archive_path = Path::new(&archive);
        let dest_path = Path::new(&destination);
        assert_absolute_path(archive_path)?;
        assert_absolute_path(dest_path)?;

        if !self.infra.is_file(archive_path).await? {
            bail!("File not found: {archive}");
        }
        let entry_count = self.infra.count_entries(archive_path).await?;
        let dest_exists = self.infra.exists(dest_path).await?;

        let mut request = OperationRequest::new(OperationKind::Extract, &destination)?
            .preview_hint(format!("archive: {archive}"));
        request.skip_confirm = skip_confirm;

        let source = PreviewSource::default()
            .target_exists(dest_exists)
            .item_count(entry_count);
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                let entries = self.infra.unpack(archive_path, dest_path).await?;
                tracing::info!(archive = %archive, destination = %destination, entries, "Archive extracted");
                Ok(ConsentOutcome::Completed(ArchiveExtractOutput { destination, entries }))
            }
        }
    }
}
