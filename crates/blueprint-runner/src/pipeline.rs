use blueprint_core::{GeneratedArtifact, GenerationContext, GenerationError, ProjectSpec, Stage};
use blueprint_llm::{CompletionClient, CompletionRequest};
use blueprint_prompts::{artifact, ArtifactPrompt, ContextEntry};
use blueprint_store::{parent_container, ArtifactStore};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::budget::fit_prompt;
use crate::options::GenerationOptions;
use crate::sanitize::sanitize;

/// Generate every artifact of `spec`, one at a time, in ascending path order.
///
/// Each prompt carries the bodies of all artifacts generated before it, so
/// the order decides which files see which context. Any failure stops the
/// run; artifacts already written stay in `store`.
pub async fn generate_artifacts(
    client: &dyn CompletionClient,
    spec: &ProjectSpec,
    store: &dyn ArtifactStore,
    options: &GenerationOptions,
    cancel: &CancellationToken,
) -> Result<GenerationContext, GenerationError> {
    spec.validate_paths()?;

    let total = spec.artifacts.len();
    let mut ctx = GenerationContext::new();

    for (i, (path, purpose)) in spec.ordered_artifacts().enumerate() {
        let stage = Stage::Artifact(path.to_string());
        if cancel.is_cancelled() {
            info!(completed = ctx.len(), total, "run cancelled");
            return Err(GenerationError::Cancelled { stage });
        }

        info!(artifact = path, step = i + 1, total, "generating artifact");
        let generated = generate_one(client, spec, path, purpose, &ctx, options, &stage).await?;
        persist(store, &generated, &stage).await?;
        ctx.record(generated);
    }

    info!(artifacts = ctx.len(), "all artifacts generated");
    Ok(ctx)
}

/// Build the prompt for `path` against the artifacts completed so far.
pub fn build_artifact_prompt(
    spec: &ProjectSpec,
    path: &str,
    purpose: &str,
    ctx: &GenerationContext,
    options: &GenerationOptions,
) -> Result<String, GenerationError> {
    let entries = ContextEntry::from_context(ctx);
    let stage = Stage::Artifact(path.to_string());
    fit_prompt(&stage, artifact::SYSTEM_INSTRUCTION, &entries, options, |previous| {
        ArtifactPrompt {
            project_name: &spec.name,
            project_description: &spec.description,
            framework: &spec.framework,
            path,
            purpose,
            previous,
        }
        .assemble()
    })
}

async fn generate_one(
    client: &dyn CompletionClient,
    spec: &ProjectSpec,
    path: &str,
    purpose: &str,
    ctx: &GenerationContext,
    options: &GenerationOptions,
    stage: &Stage,
) -> Result<GeneratedArtifact, GenerationError> {
    let prompt = build_artifact_prompt(spec, path, purpose, ctx, options)?;
    debug!(artifact = path, prompt_chars = prompt.len(), "artifact prompt built");

    let req = CompletionRequest::new(artifact::SYSTEM_INSTRUCTION, prompt, options.temperature)
        .with_model(options.model.clone());
    let raw = client
        .complete(&req)
        .await
        .map_err(|e| GenerationError::Service {
            stage: stage.clone(),
            source: Box::new(e),
        })?;

    Ok(GeneratedArtifact {
        path: path.to_string(),
        body: sanitize(&raw),
        raw_response: raw,
    })
}

async fn persist(
    store: &dyn ArtifactStore,
    artifact: &GeneratedArtifact,
    stage: &Stage,
) -> Result<(), GenerationError> {
    let write_err = |e: blueprint_store::StoreError| GenerationError::ArtifactWrite {
        stage: stage.clone(),
        source: Box::new(e),
    };

    store
        .ensure_container(parent_container(&artifact.path).unwrap_or(""))
        .await
        .map_err(write_err)?;
    store
        .write(&artifact.path, Bytes::from(artifact.body.clone()))
        .await
        .map_err(write_err)
}
