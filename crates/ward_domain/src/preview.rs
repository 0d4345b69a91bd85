use derive_setters::Setters;

use crate::OperationRequest;

/// Upper bound on preview text shown to a human or relayed to an agent.
pub const PREVIEW_MAX_CHARS: usize = 1200;

/// Metadata an adapter gathers about a pending mutation before the consent
/// check runs. Gathering is the adapter's job; shaping it into bounded text
/// happens here, with no I/O.
#[derive(Debug, Clone, Default, Setters)]
#[setters(into, strip_option)]
pub struct PreviewSource {
    pub target_exists: bool,
    /// Byte size of the existing target, when it exists.
    pub size_bytes: Option<u64>,
    /// Entry count for archive operations.
    pub item_count: Option<usize>,
    /// Pre-capped excerpt of the content being written. Callers must read
    /// at most [`PREVIEW_MAX_CHARS`] characters from disk, never the whole
    /// file.
    pub snippet: Option<String>,
    /// Set when the snippet was cut at the read boundary, so the preview
    /// reports truncation even if the assembled summary fits the cap.
    pub snippet_truncated: bool,
}

/// Bounded, truncation-aware summary of what a pending operation would
/// change. Derived, read-only, discarded after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub summary: String,
    pub truncated: bool,
}

impl PreviewInfo {
    pub fn build(request: &OperationRequest, source: &PreviewSource) -> PreviewInfo {
        Self::build_with_limit(request, source, PREVIEW_MAX_CHARS)
    }

    /// One fact per line. An absent target is a stated fact, never an
    /// error.
    pub fn build_with_limit(
        request: &OperationRequest,
        source: &PreviewSource,
        max_chars: usize,
    ) -> PreviewInfo {
        let mut lines = vec![
            format!("operation: {}", request.kind),
            format!("target: {}", request.target_path),
        ];

        if source.target_exists {
            if let Some(size) = source.size_bytes {
                lines.push(format!("existing size: {size} bytes"));
            }
        } else {
            lines.push("target does not exist".to_string());
        }

        if let Some(count) = source.item_count {
            lines.push(format!("items: {count}"));
        }

        if let Some(hint) = &request.preview_hint {
            lines.push(hint.clone());
        }

        if let Some(snippet) = &source.snippet {
            lines.push(format!("content: {snippet}"));
        }

        let mut truncated = source.snippet_truncated;
        let mut summary = lines.join("\n");
        if summary.chars().count() > max_chars {
            summary = summary.chars().take(max_chars).collect();
            truncated = true;
        }

        PreviewInfo { summary, truncated }
    }
}
