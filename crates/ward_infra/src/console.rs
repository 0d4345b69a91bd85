use std::io::{BufRead, Write};

use ward_domain::PreviewInfo;
use ward_services::UserInfra;

/// Invalid answers tolerated before a prompt resolves to denial.
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Blocking yes/no prompt over injected handles.
///
/// Layout is fixed: operation description, preview lines, then
/// `Proceed? (y/n): `. `y`/`yes` approve and `n`/`no` deny,
/// case-insensitively and whitespace-trimmed; anything else re-prompts.
/// Three invalid answers in a row, or end of input, deny.
pub fn prompt_loop<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    description: &str,
    preview: &PreviewInfo,
) -> std::io::Result<bool> {
    writeln!(output, "About to {description}")?;
    writeln!(output, "{}", preview.summary)?;
    if preview.truncated {
        writeln!(output, "(preview truncated)")?;
    }

    for _ in 0..MAX_PROMPT_ATTEMPTS {
        write!(output, "Proceed? (y/n): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input is a denial, never an approval.
            writeln!(output, "Cancelled.")?;
            return Ok(false);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => {
                writeln!(output, "Cancelled.")?;
                return Ok(false);
            }
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }

    writeln!(output, "Cancelled.")?;
    Ok(false)
}

/// Terminal-backed prompter.
///
/// Must only be used when the environment probe reports an interactive
/// terminal; the gate guarantees that.
#[derive(Clone, Default)]
pub struct WardConsole;

impl WardConsole {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl UserInfra for WardConsole {
    async fn confirm_operation(
        &self,
        description: &str,
        preview: &PreviewInfo,
    ) -> anyhow::Result<bool> {
        let description = description.to_string();
        let preview = preview.clone();

        let approved = tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let stdout = std::io::stdout();
            let mut output = stdout.lock();
            prompt_loop(&mut input, &mut output, &description, &preview)
        })
        .await??;

        tracing::debug!(approved, "Prompt answered");
        Ok(approved)
    }
}
