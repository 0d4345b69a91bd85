use crate::{EnvironmentSignal, OperationRequest};

/// Marker token embedded in every escalation error. Downstream agents
/// pattern-match on this exact string; changing it is a breaking change.
pub const CONFIRMATION_MARKER: &str = "CONFIRMATION_REQUIRED";

/// Why a request cleared consent without anyone being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantReason {
    /// The caller passed `skip_confirm=true` on this call.
    CallerFlag,
    /// The process-wide bypass variable was set.
    BypassEnv,
}

/// Outcome of the pure decision steps. `NeedsPrompt` is the only verdict
/// that requires a side effect to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Granted(GrantReason),
    NeedsPrompt,
    EscalateToCaller,
}

/// Final ruling on a pending operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Bypassed,
    ApprovedByUser,
    DeniedByUser,
    /// No human can answer here; carries the retry instruction the caller
    /// must relay upstream.
    RequiresCallerApproval(String),
}

impl Decision {
    pub fn permits_mutation(&self) -> bool {
        matches!(self, Decision::Bypassed | Decision::ApprovedByUser)
    }
}

/// What an adapter hands back when the protocol, not the mutation, settled
/// the call. A user denial is offered-and-declined, never a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> ConsentOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConsentOutcome::Cancelled)
    }

    pub fn into_completed(self) -> Option<T> {
        match self {
            ConsentOutcome::Completed(value) => Some(value),
            ConsentOutcome::Cancelled => None,
        }
    }
}

/// Decide what a pending operation needs before it may mutate state.
///
/// The order is the tie-break policy: the explicit caller flag wins over
/// the process-wide bypass, which wins over interactive prompting, which
/// wins over escalation. Reordering these checks changes observable
/// behavior, so don't.
pub fn evaluate(request: &OperationRequest, signal: &EnvironmentSignal) -> Verdict {
    if request.skip_confirm == Some(true) {
        return Verdict::Granted(GrantReason::CallerFlag);
    }

    if signal.bypass_env_active {
        return Verdict::Granted(GrantReason::BypassEnv);
    }

    if signal.is_interactive_terminal {
        return Verdict::NeedsPrompt;
    }

    Verdict::EscalateToCaller
}

/// Compose the machine-parseable instruction a non-interactive caller
/// receives instead of a prompt.
///
/// Shape is stable across versions: marker token, operation kind, target
/// path, then the exact parameter to set on retry.
pub fn retry_instruction(request: &OperationRequest) -> String {
    format!(
        "{CONFIRMATION_MARKER}: the {kind} operation on '{path}' was not executed. \
         Ask the user for approval, then retry the same call with skip_confirm=true.",
        kind = request.kind,
        path = request.target_path,
    )
}
