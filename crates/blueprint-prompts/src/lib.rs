pub mod artifact;
pub mod context;
pub mod spec;
pub mod summary;

pub use artifact::ArtifactPrompt;
pub use context::ContextEntry;
pub use summary::SummaryPrompt;

/// Size of a prompt as counted against the context budget.
pub fn prompt_size(system: &str, user: &str) -> usize {
    system.chars().count() + user.chars().count()
}
