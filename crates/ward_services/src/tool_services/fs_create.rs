use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use bytes::Bytes;
use ward_domain::{
    ConsentOutcome, Error, OperationKind, OperationRequest, PREVIEW_MAX_CHARS, PreviewInfo,
    PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileWriterInfra, UserInfra};

#[derive(Debug, PartialEq, Eq)]
pub struct FsCreateOutput {
    pub path: String,
    /// True when an existing file was replaced rather than created.
    pub replaced: bool,
}

/// Creates or overwrites a file behind the consent gate.
///
/// Overwriting an existing file additionally requires the explicit
/// `overwrite` flag; that check is validation and runs before any consent
/// logic.
pub struct WardFsCreate<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardFsCreate<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileWriterInfra + EnvironmentInfra + UserInfra> WardFsCreate<F> {
    pub async fn create(
        &self,
        path: String,
        content: String,
        overwrite: bool,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<FsCreateOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        let exists = self.infra.is_file(target).await?;
        if exists && !overwrite {
            bail!(Error::OverwriteNotAllowed(path.clone()));
        }

        let kind = if exists {
            OperationKind::Overwrite
        } else {
            OperationKind::Create
        };
        let mut request = OperationRequest::new(kind, &path)?;
        request.skip_confirm = skip_confirm;

        let mut source = PreviewSource::default()
            .target_exists(exists)
            .snippet(content.chars().take(PREVIEW_MAX_CHARS).collect::<String>())
            .snippet_truncated(content.chars().count() > PREVIEW_MAX_CHARS);
        if exists {
            source = source.size_bytes(self.infra.file_size(target).await?);
        }
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                self.infra.write(target, Bytes::from(content)).await?;
                tracing::info!(path = %path, replaced = exists, "File written");
                Ok(ConsentOutcome::Completed(FsCreateOutput { path, replaced: exists }))
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

    fn terminal_signal() -> EnvironmentSignal {
        EnvironmentSignal { is_interactive_terminal: true, bypass_env_active: false }
    }

    #[tokio::test]
    async fn test_caller_flag_writes_without_prompting() {
        let infra = MockInfra::new();
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/a.txt".into(), "hello".into(), false, Some(true))
            .await
            .unwrap();

        let expected = ConsentOutcome::Completed(FsCreateOutput {
            path: "/tmp/a.txt".to_string(),
            replaced: false,
        });
        assert_eq!(actual, expected);
        assert_eq!(infra.file("/tmp/a.txt"), Some("hello".to_string()));
        assert_eq!(infra.prompted_descriptions().len(), 0);
    }

    #[tokio::test]
    async fn test_bypass_env_writes_without_terminal() {
        let infra = MockInfra::new().with_signal(EnvironmentSignal {
            is_interactive_terminal: false,
            bypass_env_active: true,
        });
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/b.txt".into(), "data".into(), false, None)
            .await
            .unwrap();

        assert_eq!(actual.is_cancelled(), false);
        assert_eq!(infra.file("/tmp/b.txt"), Some("data".to_string()));
    }

    #[tokio::test]
    async fn test_agent_mode_raises_and_writes_nothing() {
        let infra = MockInfra::new();
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/example.txt".into(), "data".into(), false, None)
            .await
            .unwrap_err();

        let rendered = actual.to_string();
        assert!(rendered.contains(CONFIRMATION_MARKER));
        assert!(rendered.contains("create"));
        assert!(rendered.contains("/tmp/example.txt"));
        assert_eq!(infra.has_file("/tmp/example.txt"), false);
    }

    #[tokio::test]
    async fn test_interactive_yes_writes_the_file() {
        let infra = MockInfra::new()
            .with_signal(terminal_signal())
            .with_answers(vec![true]);
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/c.txt".into(), "approved".into(), false, None)
            .await
            .unwrap();

        assert_eq!(actual.is_cancelled(), false);
        assert_eq!(infra.file("/tmp/c.txt"), Some("approved".to_string()));
    }

    #[tokio::test]
    async fn test_interactive_no_cancels_without_writing() {
        let infra = MockInfra::new()
            .with_signal(terminal_signal())
            .with_answers(vec![false]);
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/d.txt".into(), "denied".into(), false, None)
            .await
            .unwrap();

        assert_eq!(actual, ConsentOutcome::Cancelled);
        assert_eq!(infra.has_file("/tmp/d.txt"), false);
    }

    #[tokio::test]
    async fn test_overwrite_without_flag_fails_before_consent() {
        let infra = MockInfra::new()
            .with_file("/tmp/e.txt", "old")
            .with_signal(terminal_signal());
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/e.txt".into(), "new".into(), false, Some(true))
            .await
            .unwrap_err();

        assert!(actual.to_string().contains("overwrite flag not set"));
        assert_eq!(infra.file("/tmp/e.txt"), Some("old".to_string()));
        assert_eq!(infra.prompted_descriptions().len(), 0);
    }

    #[tokio::test]
    async fn test_overwrite_with_flag_reports_replacement() {
        let infra = MockInfra::new().with_file("/tmp/f.txt", "old");
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("/tmp/f.txt".into(), "new".into(), true, Some(true))
            .await
            .unwrap();

        let expected = ConsentOutcome::Completed(FsCreateOutput {
            path: "/tmp/f.txt".to_string(),
            replaced: true,
        });
        assert_eq!(actual, expected);
        assert_eq!(infra.file("/tmp/f.txt"), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_preview_names_kind_and_target() {
        let infra = MockInfra::new()
            .with_signal(terminal_signal())
            .with_answers(vec![true]);
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        fixture
            .create("/tmp/g.txt".into(), "body".into(), false, None)
            .await
            .unwrap();

        let previews = infra.prompted_previews();
        assert_eq!(previews.len(), 1);
        assert!(previews[0].summary.contains("operation: create"));
        assert!(previews[0].summary.contains("target: /tmp/g.txt"));
        assert!(previews[0].summary.contains("target does not exist"));
    }

    #[tokio::test]
    async fn test_relative_path_is_rejected() {
        let infra = MockInfra::new();
        let fixture = WardFsCreate::new(Arc::new(infra.clone()));

        let actual = fixture
            .create("relative.txt".into(), "data".into(), false, Some(true))
            .await
            .unwrap_err();

        assert!(actual.to_string().contains("must be absolute"));
    }
}
