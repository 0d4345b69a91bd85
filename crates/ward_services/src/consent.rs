use std::sync::Arc;

use ward_domain::{Decision, Error, OperationRequest, PreviewInfo, Verdict, evaluate, retry_instruction};

use crate::{EnvironmentInfra, UserInfra};

/// What an adapter is allowed to do after the protocol ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    Granted,
    Declined,
}

/// Runs the consent protocol for one pending operation.
///
/// Probes the environment fresh, evaluates the pure decision steps, and
/// prompts only when the engine asks for it. Holds no state between calls:
/// consent is never cached or reused, even for the same target path.
pub struct ConsentGate<I> {
    infra: Arc<I>,
}

impl<I> ConsentGate<I> {
    pub fn new(infra: Arc<I>) -> Self {
        Self { infra }
    }
}

impl<I: EnvironmentInfra + UserInfra> ConsentGate<I> {
    /// Obtains a [`Decision`] for the request in hand.
    pub async fn authorize(
        &self,
        request: &OperationRequest,
        preview: &PreviewInfo,
    ) -> anyhow::Result<Decision> {
        let signal = self.infra.probe();

        match evaluate(request, &signal) {
            Verdict::Granted(reason) => {
                tracing::debug!(
                    operation = %request.kind,
                    path = %request.target_path,
                    ?reason,
                    "Consent bypassed"
                );
                Ok(Decision::Bypassed)
            }
            Verdict::NeedsPrompt => {
                let approved = self
                    .infra
                    .confirm_operation(&request.describe(), preview)
                    .await?;
                Ok(if approved {
                    Decision::ApprovedByUser
                } else {
                    Decision::DeniedByUser
                })
            }
            Verdict::EscalateToCaller => Ok(Decision::RequiresCallerApproval(
                retry_instruction(request),
            )),
        }
    }

    /// The uniform call-site shape every adapter uses: mutate on `Granted`,
    /// return a cancellation on denial, raise the stable retry error on
    /// escalation.
    pub async fn clear(
        &self,
        request: &OperationRequest,
        preview: &PreviewInfo,
    ) -> anyhow::Result<Clearance> {
        match self.authorize(request, preview).await? {
            Decision::Bypassed | Decision::ApprovedByUser => Ok(Clearance::Granted),
            Decision::DeniedByUser => {
                tracing::info!(
                    operation = %request.kind,
                    path = %request.target_path,
                    "Operation declined by user"
                );
                Ok(Clearance::Declined)
            }
            Decision::RequiresCallerApproval(_) => {
                Err(Error::confirmation_required(request).into())
            }
        }
    }
}
