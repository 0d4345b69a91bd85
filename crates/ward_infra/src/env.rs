use std::io::IsTerminal;

use ward_domain::{BYPASS_ENV_VAR, EnvironmentSignal, is_truthy};
use ward_services::EnvironmentInfra;

/// Observes the ambient execution context.
///
/// Stateless on purpose: both facts are re-read on every probe, since the
/// hosting process can gain or lose a terminal (redirection, daemonization)
/// and the bypass variable can be set or cleared between calls.
#[derive(Clone, Default)]
pub struct WardEnvironmentInfra;

impl WardEnvironmentInfra {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentInfra for WardEnvironmentInfra {
    fn probe(&self) -> EnvironmentSignal {
        // Both ends must be a real terminal; a piped stdin or captured
        // stdout means nobody can answer a prompt.
        let is_interactive_terminal =
            std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

        let bypass_env_active = self
            .get_env_var(BYPASS_ENV_VAR)
            .is_some_and(|value| is_truthy(&value));

        EnvironmentSignal { is_interactive_terminal, bypass_env_active }
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
