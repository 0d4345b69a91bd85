use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use toml_edit::DocumentMut;
use ward_domain::{
    ConsentOutcome, OperationKind, OperationRequest, PreviewInfo, PreviewSource,
};

use crate::utils::assert_absolute_path;
use crate::{
    Clearance, ConsentGate, EnvironmentInfra, FileInfoInfra, FileReaderInfra, FileWriterInfra,
    UserInfra,
};

#[derive(Debug, PartialEq, Eq)]
pub struct ConfigWriteOutput {
    pub path: String,
    pub key: String,
    /// True when the config file did not exist before this call.
    pub created: bool,
}

/// Sets one key in a TOML config file behind the consent gate.
///
/// Existing formatting and comments survive the edit (`toml_edit`); a
/// missing file starts from an empty document. Dotted keys address nested
/// tables.
pub struct WardConfigWrite<F> {
    infra: Arc<F>,
    gate: ConsentGate<F>,
}

impl<F> WardConfigWrite<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { gate: ConsentGate::new(infra.clone()), infra }
    }
}

impl<F: FileInfoInfra + FileReaderInfra + FileWriterInfra + EnvironmentInfra + UserInfra>
    WardConfigWrite<F>
{
    pub async fn set_key(
        &self,
        path: String,
        key: String,
        value: String,
        skip_confirm: Option<bool>,
    ) -> anyhow::Result<ConsentOutcome<ConfigWriteOutput>> {
        let target = Path::new(&path);
        assert_absolute_path(target)?;

        let exists = self.infra.is_file(target).await?;
        let mut document = if exists {
            self.infra
                .read_utf8(target)
                .await?
                .parse::<DocumentMut>()
                .with_context(|| format!("Failed to parse TOML config {path}"))?
        } else {
            DocumentMut::new()
        };
        set_dotted_key(&mut document, &key, &value)?;

        let kind = if exists {
            OperationKind::Overwrite
        } else {
            OperationKind::Create
        };
        let mut request = OperationRequest::new(kind, &path)?
            .preview_hint(format!("set {key} = {value}"));
        request.skip_confirm = skip_confirm;

        let mut source = PreviewSource::default().target_exists(exists);
        if exists {
            source = source.size_bytes(self.infra.file_size(target).await?);
        }
        let preview = PreviewInfo::build(&request, &source);

        match self.gate.clear(&request, &preview).await? {
            Clearance::Declined => Ok(ConsentOutcome::Cancelled),
            Clearance::Granted => {
                self.infra
                    .write(target, Bytes::from(document.to_string()))
                    .await?;
                tracing::info!(path = %path, key = %key, "Config key written");
                Ok(ConsentOutcome::Completed(ConfigWriteOutput {
                    path,
                    key,
                    created: !exists,
                }))
            }
        }
    }
}

/// Walks `a.b.c` through nested tables, creating them as needed. Fails when
/// a segment already holds a non-table value.
fn set_dotted_key(document: &mut DocumentMut, key: &str, value: &str) -> anyhow::Result<()> {
    let mut segments: Vec<&str> = key.split('.').collect();
    let leaf = segments.pop().unwrap_or(key);

    let mut table = document.as_table_mut();
    for segment in segments {
        let item = table
            .entry(segment)
            .or_insert(toml_edit::Item::Table(toml_edit::Table::new()));
        table = item
            .as_table_mut()
            .with_context(|| format!("Config key '{key}' collides with non-table '{segment}'"))?;
    }
    table[leaf] = toml_edit::value(value);
    Ok(())
}
