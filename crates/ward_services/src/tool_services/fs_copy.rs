use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileTransferInfra, UserInfra,
};

#[derive(Debug, PartialEq, Eq)]
pub struct FsCopyOutput {
    pub from: String,
    pub to: String,
    pub size_bytes: u64,
}

/// Copies a file behind the consent gate.
///
/// The mutated path is the destination, so the request targets it: a copy
/// that lands on an existing file is an overwrite, otherwise a create.
pub struct WardFsCopy<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardFsCopy<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileTransferInfra + EnvironmentInfra + UserInfra> WardFsCopy<F> {
    pub async fn copy(
        &self,
        from: String,
        to: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<FsCopyOutput>> {
        let source_path = Path::new(&from);
        let dest_path = Path::new(&to);
        assert_absolute_path(source_path)?;
        assert_absolute_path(dest_path)?;

        if !self.infra.is_file(source_path).await? {
            bail!("File not found: {from}");
        }
        let dest_exists = self.infra.is_file(dest_path).await?;

        let kind = if dest_exists {
            OperationKind::Overwrite
        } else {
            OperationKind::Create
        };
        let mut request = OperationRequest::new(kind, &to)?
            .preview_hint(format!("copy of: {from}"));
        request.skip_confirm = skip_confirm;

        let mut source = PreviewSource::default().target_exists(dest_exists);
        if dest_exists {
            source = source.size_bytes(self.infra.file_size(dest_path).await?);
        }
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                let size_bytes = self.infra.copy(source_path, dest_path).await?;
                tracing::info!(from = %from, to = %to, size_bytes, "File copied");
                Ok(ConsentOutcome::Completed(FsCopyOutput { from, to, size_bytes }))
            }
        }
    }
}
