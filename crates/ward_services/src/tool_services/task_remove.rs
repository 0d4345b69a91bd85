use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileReaderInfra, FileWriterInfra,
    UserInfra,
};

/// One entry in a JSON task list file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TaskRemoveOutput {
    pub path: String,
    pub removed: Task,
    pub remaining: usize,
}

/// Deletes one task from a JSON task list behind the consent gate.
pub struct WardTaskRemove<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardTaskRemove<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileReaderInfra + FileWriterInfra + EnvironmentInfra + UserInfra>
    WardTaskRemove<F>
{
    pub async fn remove_task(
        &self,
        path: String,
        task_id: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<TaskRemoveOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        if !self.infra.is_file(target).await? {
            bail!("File not found: {path}");
        }
        let content = self.infra.read_utf8(target).await?;
        let tasks: Vec<Task> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse task list {path}"))?;

        let Some(task) = tasks.iter().find(|task| task.id == task_id).cloned() else {
            bail!("Task not found: {task_id}");
        };

        let mut request = OperationRequest::new(OperationKind::Delete, &path)?
            .preview_hint(format!("task: {} ({})", task.title, task.id));
        request.skip_confirm = skip_confirm;

        let source = PreviewSource::default()
            .target_exists(true)
            .size_bytes(self.infra.file_size(target).await?)
            .item_count(tasks.len());
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                let remaining: Vec<Task> = tasks
                    .into_iter()
                    .filter(|task| task.id != task_id)
                    .collect();
                let serialized = serde_json::to_string_pretty(&remaining)
                    .with_context(|| format!("Failed to serialize task list {path}"))?;
                self.infra.write(target, Bytes::from(serialized)).await?;
                tracing::info!(path = %path, task_id = %task_id, "Task removed");
                Ok(ConsentOutcome::Completed(TaskRemoveOutput {
                    path,
                    removed: task,
                    remaining: remaining.len(),
                }))
            }
        }
    }
}
