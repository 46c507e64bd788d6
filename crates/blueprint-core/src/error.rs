use std::fmt;

use thiserror::Error;

use crate::path::PathError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

static SYNTHESIS: Stage = Stage::Synthesis;

/// The step of a generation run an error (or cancellation) is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Synthesis,
    Artifact(String),
    Summary,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Synthesis => f.write_str("spec synthesis"),
            Stage::Artifact(path) => write!(f, "artifact {path}"),
            Stage::Summary => f.write_str("summary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{stage}: service call failed: {source}")]
    Service {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    #[error("spec synthesis: could not parse project spec: {0}")]
    SpecParse(String),

    #[error("{stage}: write failed: {source}")]
    ArtifactWrite {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    #[error("invalid path {path:?}: {source}")]
    Validation {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("{stage}: prompt context is {size} chars, limit is {limit}")]
    ContextBudgetExceeded {
        stage: Stage,
        size: usize,
        limit: usize,
    },

    #[error("{stage}: cancelled before start")]
    Cancelled { stage: Stage },
}

impl GenerationError {
    /// The stage this error belongs to, when it can be pinned to one.
    pub fn stage(&self) -> Option<&Stage> {
        match self {
            GenerationError::Service { stage, .. }
            | GenerationError::ArtifactWrite { stage, .. }
            | GenerationError::ContextBudgetExceeded { stage, .. }
            | GenerationError::Cancelled { stage } => Some(stage),
            GenerationError::SpecParse(_) => Some(&SYNTHESIS),
            GenerationError::Validation { .. } => None,
        }
    }

    /// The artifact path this error identifies, if any.
    pub fn artifact_path(&self) -> Option<&str> {
        match self {
            GenerationError::Validation { path, .. } => Some(path),
            other => match other.stage() {
                Some(Stage::Artifact(path)) => Some(path),
                _ => None,
            },
        }
    }
}
