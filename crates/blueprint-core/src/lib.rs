pub mod context;
pub mod error;
pub mod path;
pub mod spec;

pub use context::{GeneratedArtifact, GenerationContext};
pub use error::{GenerationError, Stage};
pub use path::{normalize_relative_path, validate_relative_path, PathError};
pub use spec::ProjectSpec;

/// Well-known name of the summary artifact written at the project root.
pub const SUMMARY_ARTIFACT: &str = "README.md";
