use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::path::{normalize_relative_path, validate_relative_path, PathError};

/// The synthesized plan for one project.
///
/// `artifacts` is a `BTreeMap`, so iteration yields paths in ascending
/// byte-wise lexicographic order. Generation order and prompt context
/// both depend on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(rename = "files")]
    pub artifacts: BTreeMap<String, String>,
    #[serde(default)]
    pub description: String,
}

impl ProjectSpec {
    /// Check the fields downstream stages cannot work without.
    pub fn check_complete(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("project name is empty".into());
        }
        if self.artifacts.is_empty() {
            return Err("project lists no files".into());
        }
        Ok(())
    }

    /// Validate the project name and every artifact key as safe relative paths.
    ///
    /// Keys are compared after normalization: two keys naming the same file,
    /// or a key naming a directory another key needs, are rejected.
    pub fn validate_paths(&self) -> Result<(), GenerationError> {
        validate_relative_path(&self.name).map_err(|source| invalid(&self.name, source))?;

        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for path in self.artifacts.keys() {
            let normalized = normalize_relative_path(path).map_err(|source| invalid(path, source))?;
            if let Some(first) = seen.insert(normalized, path) {
                return Err(invalid(path, PathError::Duplicate(first.to_string())));
            }
        }

        for (normalized, path) in &seen {
            let mut dir = normalized.as_str();
            while let Some(i) = dir.rfind('/') {
                dir = &dir[..i];
                if let Some(other) = seen.get(dir) {
                    return Err(invalid(other, PathError::DirectoryOfOther(path.to_string())));
                }
            }
        }
        Ok(())
    }

    /// Artifact paths with their descriptions in generation order.
    pub fn ordered_artifacts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.artifacts
            .iter()
            .map(|(path, desc)| (path.as_str(), desc.as_str()))
    }
}

fn invalid(path: &str, source: PathError) -> GenerationError {
    GenerationError::Validation {
        path: path.to_string(),
        source,
    }
}
