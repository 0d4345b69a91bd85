use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use bytes::Bytes;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PREVIEW_MAX_CHARS, PreviewInfo,
    PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileWriterInfra, UserInfra,
};

#[derive(Debug, PartialEq, Eq)]
pub struct TextAppendOutput {
    pub path: String,
    pub appended_bytes: usize,
}

/// Appends a block of text to an existing file behind the consent gate.
///
/// Appending modifies existing content, so it gates as an overwrite of the
/// target.
pub struct WardTextAppend<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardTextAppend<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileWriterInfra + EnvironmentInfra + UserInfra> WardTextAppend<F> {
    pub async fn append(
        &self,
        path: String,
        content: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<TextAppendOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        if !self.infra.is_file(target).await? {
            bail!("File not found: {path}");
        }

        let mut request = OperationRequest::new(OperationKind::Overwrite, &path)?
            .preview_hint(format!("append {} bytes", content.len()));
        request.skip_confirm = skip_confirm;

        let source = PreviewSource::default()
            .target_exists(true)
            .size_bytes(self.infra.file_size(target).await?)
            .snippet(content.chars().take(PREVIEW_MAX_CHARS).collect::<String>())
            .snippet_truncated(content.chars().count() > PREVIEW_MAX_CHARS);
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                let appended_bytes = content.len();
                self.infra.append(target, Bytes::from(content)).await?;
                tracing::info!(path = %path, appended_bytes, "Text appended");
                Ok(ConsentOutcome::Completed(TextAppendOutput { path, appended_bytes }))
            }
        }
    }
}
