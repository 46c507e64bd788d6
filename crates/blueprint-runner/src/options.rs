use clap::ValueEnum;

/// What to do when a prompt would exceed the context budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContextOverflow {
    /// Stop the run with `ContextBudgetExceeded`.
    #[default]
    Fail,
    /// Leave the oldest completed artifacts out of the prompt until it fits.
    Truncate,
}

/// Knobs shared by every stage of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Model for synthesis and artifact calls; `None` uses the client default.
    pub model: Option<String>,
    /// Model for the summary call; `None` falls back to `model`.
    pub summary_model: Option<String>,
    /// Upper bound on system + user prompt size, in characters.
    pub max_context_chars: usize,
    pub context_overflow: ContextOverflow,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            model: None,
            summary_model: None,
            max_context_chars: 400_000,
            context_overflow: ContextOverflow::Fail,
        }
    }
}

impl GenerationOptions {
    pub fn summary_model(&self) -> Option<String> {
        self.summary_model.clone().or_else(|| self.model.clone())
    }
}
