use thiserror::Error;

use crate::{OperationKind, OperationRequest, consent};

// NOTE: validation variants are raised before any consent logic runs;
// ConfirmationRequired is the only variant agent frameworks are expected to
// pattern-match on, and its Display shape is stable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Target path must not be empty")]
    EmptyTargetPath,

    #[error("Target path must be absolute: {0}")]
    RelativeTargetPath(String),

    #[error("Cannot overwrite existing file: overwrite flag not set: {0}")]
    OverwriteNotAllowed(String),

    #[error("{instruction}")]
    ConfirmationRequired {
        kind: OperationKind,
        path: String,
        instruction: String,
    },
}

impl Error {
    pub fn confirmation_required(request: &OperationRequest) -> Self {
        Self::ConfirmationRequired {
            kind: request.kind,
            path: request.target_path.clone(),
            instruction: consent::retry_instruction(request),
        }
    }
}

pub type Result<A> = std::result::Result<A, Error>;
