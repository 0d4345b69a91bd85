/// Process-wide bypass switch consulted on every call.
pub const BYPASS_ENV_VAR: &str = "BYPASS_TOOL_CONSENT";

/// Snapshot of the ambient execution context.
///
/// Recomputed per call and never cached: terminal attachment and the bypass
/// variable can both change while the host process is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentSignal {
    pub is_interactive_terminal: bool,
    pub bypass_env_active: bool,
}

/// Truthy parsing for the bypass switch: "true", "1" and "yes" in any case.
/// Absence and every other value mean the switch is off.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
