use blueprint_core::{GenerationError, ProjectSpec};
use blueprint_llm::CompletionClient;
use blueprint_store::ArtifactStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::options::GenerationOptions;
use crate::pipeline::generate_artifacts;
use crate::summary::generate_summary;

/// Outcome of a successful generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub project: String,
    /// Artifact paths in the order they were generated.
    pub artifacts: Vec<String>,
    pub summary: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn elapsed_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Run the artifact pipeline and then the summary for one spec.
///
/// The summary is only attempted once every artifact succeeded.
pub async fn run_project(
    client: &dyn CompletionClient,
    spec: &ProjectSpec,
    store: &dyn ArtifactStore,
    options: &GenerationOptions,
    cancel: &CancellationToken,
) -> Result<RunReport, GenerationError> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id, project = %spec.name);

    async move {
        let started_at = Utc::now();
        info!(files = spec.artifacts.len(), "starting generation run");

        let ctx = generate_artifacts(client, spec, store, options, cancel).await?;
        let summary = generate_summary(client, spec, &ctx, store, options, cancel).await?;

        let report = RunReport {
            run_id,
            project: spec.name.clone(),
            artifacts: ctx.paths().map(String::from).collect(),
            summary: summary.path,
            started_at,
            finished_at: Utc::now(),
        };
        info!(elapsed_secs = report.elapsed_seconds(), "generation run complete");
        Ok::<_, GenerationError>(report)
    }
    .instrument(span)
    .await
}
