use blueprint_core::{GenerationError, Stage};
use blueprint_prompts::{prompt_size, ContextEntry};
use tracing::warn;

use crate::options::{ContextOverflow, GenerationOptions};

/// Assemble a prompt from `entries` that fits the context budget.
///
/// With `ContextOverflow::Truncate` the oldest entries are left out one at a
/// time; the prompt must still fit once every entry is gone.
pub(crate) fn fit_prompt<F>(
    stage: &Stage,
    system: &str,
    entries: &[ContextEntry<'_>],
    options: &GenerationOptions,
    assemble: F,
) -> Result<String, GenerationError>
where
    F: Fn(&[ContextEntry<'_>]) -> String,
{
    let limit = options.max_context_chars;
    let mut skip = 0;
    loop {
        let prompt = assemble(&entries[skip..]);
        let size = prompt_size(system, &prompt);
        if size <= limit {
            if skip > 0 {
                warn!(
                    %stage,
                    dropped = skip,
                    kept = entries.len() - skip,
                    limit,
                    "context truncated to fit budget"
                );
            }
            return Ok(prompt);
        }
        if options.context_overflow == ContextOverflow::Fail || skip == entries.len() {
            return Err(GenerationError::ContextBudgetExceeded {
                stage: stage.clone(),
                size,
                limit,
            });
        }
        skip += 1;
    }
}
