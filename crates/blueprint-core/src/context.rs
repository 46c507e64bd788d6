use std::collections::HashMap;

/// One generated artifact, as produced by a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: String,
    /// Sanitized body, the bytes that get persisted.
    pub body: String,
    /// Unmodified service response, kept for diagnostics only.
    pub raw_response: String,
}

/// Artifacts completed so far in one run.
///
/// Entries are kept in the order they were recorded; prompt rendering walks
/// that sequence. The path index is only for point lookups.
#[derive(Debug, Default, Clone)]
pub struct GenerationContext {
    entries: Vec<GeneratedArtifact>,
    index: HashMap<String, usize>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed artifact. Recording a path twice replaces the body
    /// in place and keeps its original position.
    pub fn record(&mut self, artifact: GeneratedArtifact) {
        match self.index.get(&artifact.path) {
            Some(&i) => self.entries[i] = artifact,
            None => {
                self.index.insert(artifact.path.clone(), self.entries.len());
                self.entries.push(artifact);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedArtifact> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    pub fn body(&self, path: &str) -> Option<&str> {
        self.get(path).map(|a| a.body.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Completed artifacts in recording order.
    pub fn completed(&self) -> &[GeneratedArtifact] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|a| a.path.as_str())
    }
}
