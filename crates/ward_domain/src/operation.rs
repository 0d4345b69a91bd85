use derive_setters::Setters;
use strum_macros::{Display, EnumString};

use crate::Error;

/// Kinds of state-mutating operations that must clear consent before
/// touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    Create,
    Overwrite,
    Delete,
    Move,
    Compress,
    Extract,
}

/// A single pending mutation, constructed fresh per call and never reused.
///
/// Consent is scoped to the exact request in hand: approving an overwrite
/// of a path says nothing about the next call, even against the same path.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
#[setters(into, strip_option)]
pub struct OperationRequest {
    #[setters(skip)]
    pub kind: OperationKind,
    #[setters(skip)]
    pub target_path: String,
    /// Tri-state per-call bypass: `Some(true)` skips consent for this call
    /// only; `Some(false)` and `None` both leave the environment in charge.
    pub skip_confirm: Option<bool>,
    pub preview_hint: Option<String>,
}

impl OperationRequest {
    /// Rejects an empty or whitespace-only target before any consent logic
    /// runs.
    pub fn new(kind: OperationKind, target_path: impl Into<String>) -> crate::Result<Self> {
        let target_path = target_path.into();
        if target_path.trim().is_empty() {
            return Err(Error::EmptyTargetPath);
        }
        Ok(Self { kind, target_path, skip_confirm: None, preview_hint: None })
    }

    /// One-line description used by the prompter and the retry error.
    pub fn describe(&self) -> String {
        format!("{} {}", self.kind, self.target_path)
    }
}
