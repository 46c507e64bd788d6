use blueprint_core::{GenerationError, ProjectSpec, Stage};
use blueprint_llm::{CompletionClient, CompletionRequest};
use blueprint_prompts::spec;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::options::GenerationOptions;
use crate::sanitize::sanitize_document;

/// Turn a free-text request into a `ProjectSpec`.
///
/// An empty request is sent as-is. There is no retry here; a failed
/// synthesis is reported and the caller decides whether to ask again.
pub async fn synthesize(
    client: &dyn CompletionClient,
    request: &str,
    options: &GenerationOptions,
    cancel: &CancellationToken,
) -> Result<ProjectSpec, GenerationError> {
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled {
            stage: Stage::Synthesis,
        });
    }

    info!(client = client.name(), "synthesizing project spec");
    let req = CompletionRequest::new(
        spec::SYSTEM_INSTRUCTION,
        spec::user_message(request),
        options.temperature,
    )
    .with_model(options.model.clone());

    let raw = client
        .complete(&req)
        .await
        .map_err(|e| GenerationError::Service {
            stage: Stage::Synthesis,
            source: Box::new(e),
        })?;

    let spec = parse_spec(&raw)?;
    info!(
        project = %spec.name,
        files = spec.artifacts.len(),
        "project spec synthesized"
    );
    Ok(spec)
}

/// Parse a service response into a complete `ProjectSpec`.
pub fn parse_spec(raw: &str) -> Result<ProjectSpec, GenerationError> {
    let cleaned = sanitize_document(raw);
    debug!(chars = cleaned.len(), "parsing project spec");

    let spec: ProjectSpec =
        serde_json::from_str(&cleaned).map_err(|e| GenerationError::SpecParse(e.to_string()))?;
    spec.check_complete().map_err(GenerationError::SpecParse)?;
    Ok(spec)
}
