use std::path::Path;
use std::sync::Arc;

use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileDirectoryInfra, FileInfoInfra, UserInfra,
};

#[derive(Debug, PartialEq, Eq)]
pub struct DirCreateOutput {
    pub path: String,
    /// True when the directory was already present; the call is then a
    /// gated no-op.
    pub already_existed: bool,
}

/// Creates a directory tree behind the consent gate.
pub struct WardDirCreate<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardDirCreate<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileDirectoryInfra + EnvironmentInfra + UserInfra> WardDirCreate<F> {
    pub async fn create(
        &self,
        path: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<DirCreateOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        let already_existed = self.infra.exists(target).await?;

        let mut request = OperationRequest::new(OperationKind::Create, &path)?;
        request.skip_confirm = skip_confirm;

        let source = PreviewSource::default().target_exists(already_existed);
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                self.infra.create_dirs(target).await?;
                tracing::info!(path = %path, already_existed, "Directory created");
                Ok(ConsentOutcome::Completed(DirCreateOutput { path, already_existed }))
            }
        }
    }
}
