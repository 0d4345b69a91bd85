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
pub struct FsMoveOutput {
    pub from: String,
    pub to: String,
    /// True when the destination existed and was replaced by the move.
    pub replaced_destination: bool,
}

/// Moves or renames a file behind the consent gate.
///
/// The request targets the source path (the file being taken away); the
/// destination is surfaced as a preview fact, including whether the move
/// will replace it.
pub struct WardFsMove<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardFsMove<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileTransferInfra + EnvironmentInfra + UserInfra> WardFsMove<F> {
    pub async fn rename(
        &self,
        from: String,
        to: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<FsMoveOutput>> {
        let source_path = Path::new(&from);
        let dest_path = Path::new(&to);
        assert_absolute_path(source_path)?;
        assert_absolute_path(dest_path)?;

        if !self.infra.is_file(source_path).await? {
            bail!("File not found: {from}");
        }
        let dest_exists = self.infra.exists(dest_path).await?;

        let hint = if dest_exists {
            format!("destination: {to} (exists, will be replaced)")
        } else {
            format!("destination: {to}")
        };
        let mut request =
            OperationRequest::new(OperationKind::Move, &from)?.preview_hint(hint);
        request.skip_confirm = skip_confirm;

        let source = PreviewSource::default()
            .target_exists(true)
            .size_bytes(self.infra.file_size(source_path).await?);
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                self.infra.rename(source_path, dest_path).await?;
                tracing::info!(from = %from, to = %to, "File moved");
                Ok(ConsentOutcome::Completed(FsMoveOutput {
                    from,
                    to,
                    replaced_destination: dest_exists,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ward_domain::{CONFIRMATION_MARKER, EnvironmentSignal};

    use super::*;
    use crate::test_support::MockInfra;

    #[tokio::test]
    async fn test_caller_flag_moves_the_file() {
        let infra = MockInfra::new().with_file("/tmp/src.txt", "payload");
        let fixture = WardFsMove::new(Arc::new(infra.clone()));

        let actual = fixture
            .rename("/tmp/src.txt".into(), "/tmp/dst.txt".into(), Some(true))
            .await
            .unwrap();

        let expected = ConsentOutcome::Completed(FsMoveOutput {
            from: "/tmp/src.txt".to_string(),
            to: "/tmp/dst.txt".to_string(),
            replaced_destination: false,
        });
        assert_eq!(actual, expected);
        assert_eq!(infra.has_file("/tmp/src.txt"), false);
        assert_eq!(infra.file("/tmp/dst.txt"), Some("payload".to_string()));
    }

    #[tokio::test]
    async fn test_existing_destination_is_reported_in_preview() {
        let infra = MockInfra::new()
            .with_file("/tmp/src.txt", "new")
            .with_file("/tmp/dst.txt", "old")
            .with_signal(EnvironmentSignal {
                is_interactive_terminal: true,
                bypass_env_active: false,
            })
            .with_answers(vec![true]);
        let fixture = WardFsMove::new(Arc::new(infra.clone()));

        let actual = fixture
            .rename("/tmp/src.txt".into(), "/tmp/dst.txt".into(), None)
            .await
            .unwrap();

        assert_eq!(actual.is_cancelled(), false);
        let previews = infra.prompted_previews();
        assert!(previews[0].summary.contains("will be replaced"));
    }

    #[tokio::test]
    async fn test_agent_mode_leaves_both_paths_untouched() {
        let infra = MockInfra::new().with_file("/tmp/src.txt", "payload");
        let fixture = WardFsMove::new(Arc::new(infra.clone()));

        let actual = fixture
            .rename("/tmp/src.txt".into(), "/tmp/dst.txt".into(), None)
            .await
            .unwrap_err();

        assert!(actual.to_string().contains(CONFIRMATION_MARKER));
        assert_eq!(infra.has_file("/tmp/src.txt"), true);
        assert_eq!(infra.has_file("/tmp/dst.txt"), false);
    }

    #[tokio::test]
    async fn test_missing_source_fails_before_consent() {
        let infra = MockInfra::new();
        let fixture = WardFsMove::new(Arc::new(infra.clone()));

        let actual = fixture
            .rename("/tmp/absent.txt".into(), "/tmp/dst.txt".into(), Some(true))
            .await
            .unwrap_err();

        assert!(actual.to_string().contains("File not found"));
    }
}
