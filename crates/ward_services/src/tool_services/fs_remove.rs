use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PREVIEW_MAX_CHARS, PreviewInfo,
    PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileReaderInfra, FileRemoverInfra,
    UserInfra,
};

#[derive(Debug, PartialEq, Eq)]
pub struct FsRemoveOutput {
    pub path: String,
    /// Byte size of the file that was removed.
    pub size_bytes: u64,
}

/// Deletes a file behind the consent gate.
pub struct WardFsRemove<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardFsRemove<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileReaderInfra + FileRemoverInfra + EnvironmentInfra + UserInfra>
    WardFsRemove<F>
{
    pub async fn remove(
        &self,
        path: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<FsRemoveOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        if !self.infra.is_file(target).await? {
            bail!("File not found: {path}");
        }
        let size_bytes = self.infra.file_size(target).await?;

        let mut request = OperationRequest::new(OperationKind::Delete, &path)?;
        request.skip_confirm = skip_confirm;

        // Show what is about to disappear, without ever reading more than
        // the preview can hold.
        let (snippet, snippet_truncated) =
            self.infra.read_capped(target, PREVIEW_MAX_CHARS).await?;
        let source = PreviewSource::default()
            .target_exists(true)
            .size_bytes(size_bytes)
            .snippet(snippet)
            .snippet_truncated(snippet_truncated);
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                self.infra.remove(target).await?;
                tracing::info!(path = %path, size_bytes, "File removed");
                Ok(ConsentOutcome::Completed(FsRemoveOutput { path, size_bytes }))
            }
        }
    }
}
