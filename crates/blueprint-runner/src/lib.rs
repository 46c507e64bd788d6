pub mod config;
pub mod options;
pub mod pipeline;
pub mod run;
pub mod sanitize;
pub mod session;
pub mod summary;
pub mod synthesize;

mod budget;

pub use options::{ContextOverflow, GenerationOptions};
pub use pipeline::generate_artifacts;
pub use run::{run_project, RunReport};
pub use sanitize::{sanitize, sanitize_document};
pub use summary::generate_summary;
pub use synthesize::synthesize;
