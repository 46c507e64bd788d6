use blueprint_core::{
    GeneratedArtifact, GenerationContext, GenerationError, ProjectSpec, Stage, SUMMARY_ARTIFACT,
};
use blueprint_llm::{CompletionClient, CompletionRequest};
use blueprint_prompts::{summary, ContextEntry, SummaryPrompt};
use blueprint_store::ArtifactStore;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::budget::fit_prompt;
use crate::options::GenerationOptions;
use crate::sanitize::sanitize_document;

/// Produce the project summary from every completed artifact and write it
/// as `README.md` at the project root.
///
/// Call once, after `generate_artifacts` succeeded. A failure here leaves
/// the per-artifact outputs in place.
pub async fn generate_summary(
    client: &dyn CompletionClient,
    spec: &ProjectSpec,
    ctx: &GenerationContext,
    store: &dyn ArtifactStore,
    options: &GenerationOptions,
    cancel: &CancellationToken,
) -> Result<GeneratedArtifact, GenerationError> {
    let stage = Stage::Summary;
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled { stage });
    }

    if ctx.get(SUMMARY_ARTIFACT).is_some() {
        warn!(
            artifact = SUMMARY_ARTIFACT,
            "generated artifact will be replaced by the project summary"
        );
    }

    let prompt = build_summary_prompt(spec, ctx, options)?;
    info!(artifacts = ctx.len(), "generating project summary");

    let req = CompletionRequest::new(summary::SYSTEM_INSTRUCTION, prompt, options.temperature)
        .with_model(options.summary_model());
    let raw = client
        .complete(&req)
        .await
        .map_err(|e| GenerationError::Service {
            stage: stage.clone(),
            source: Box::new(e),
        })?;

    let body = sanitize_document(&raw);
    let write_err = |e: blueprint_store::StoreError| GenerationError::ArtifactWrite {
        stage: Stage::Summary,
        source: Box::new(e),
    };
    store.ensure_container("").await.map_err(write_err)?;
    store
        .write(SUMMARY_ARTIFACT, Bytes::from(body.clone()))
        .await
        .map_err(write_err)?;

    info!(artifact = SUMMARY_ARTIFACT, "project summary written");
    Ok(GeneratedArtifact {
        path: SUMMARY_ARTIFACT.to_string(),
        body,
        raw_response: raw,
    })
}

pub fn build_summary_prompt(
    spec: &ProjectSpec,
    ctx: &GenerationContext,
    options: &GenerationOptions,
) -> Result<String, GenerationError> {
    let entries = ContextEntry::from_context(ctx);
    fit_prompt(&Stage::Summary, summary::SYSTEM_INSTRUCTION, &entries, options, |artifacts| {
        SummaryPrompt {
            project_name: &spec.name,
            project_description: &spec.description,
            framework: &spec.framework,
            components: &spec.components,
            artifacts,
        }
        .assemble()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_llm::mock::ScriptedClient;
    use blueprint_llm::LlmError;
    use blueprint_store::LocalStore;

    fn spec() -> ProjectSpec {
        ProjectSpec {
            name: "demo".into(),
            kind: "web".into(),
            framework: "axum".into(),
            components: vec!["api".into(), "db".into()],
            artifacts: [("src/main.rs".to_string(), "entry".to_string())]
                .into_iter()
                .collect(),
            description: "demo project".into(),
        }
    }

    fn ctx_with(files: &[(&str, &str)]) -> GenerationContext {
        let mut ctx = GenerationContext::new();
        for (path, body) in files {
            ctx.record(GeneratedArtifact {
                path: path.to_string(),
                body: body.to_string(),
                raw_response: body.to_string(),
            });
        }
        ctx
    }

    #[tokio::test]
    async fn writes_sanitized_readme_with_summary_model() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path().join("demo"));
        let client = ScriptedClient::replying(vec!["```markdown\n# Demo\n\nRun it.\n```"]);
        let options = GenerationOptions {
            model: Some("gpt-4-turbo".into()),
            summary_model: Some("gpt-4o".into()),
            ..Default::default()
        };
        let ctx = ctx_with(&[("src/main.rs", "fn main() {}")]);

        let out = generate_summary(&client, &spec(), &ctx, &store, &options, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(out.body, "# Demo\n\nRun it.");
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("demo/README.md")).unwrap(),
            "# Demo\n\nRun it."
        );

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model.as_deref(), Some("gpt-4o"));
        let prompt = calls[0].user_content().unwrap();
        assert!(prompt.contains("fn main() {}"));
        assert!(prompt.contains("Components: api, db"));
    }

    #[tokio::test]
    async fn service_failure_is_summary_stage() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());
        let client = ScriptedClient::new(|_, _| Err(LlmError::Transport("reset".into())));

        let err = generate_summary(
            &client,
            &spec(),
            &ctx_with(&[("a.txt", "A")]),
            &store,
            &GenerationOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.stage(), Some(&Stage::Summary));
        assert!(!tmp.path().join("README.md").exists());
    }

    #[test]
    fn prompt_contains_every_body() {
        let ctx = ctx_with(&[("a.txt", "BODY-A"), ("b.txt", "BODY-B"), ("c.txt", "BODY-C")]);
        let prompt = build_summary_prompt(&spec(), &ctx, &GenerationOptions::default()).unwrap();
        for body in ["BODY-A", "BODY-B", "BODY-C"] {
            assert!(prompt.contains(body));
        }
    }
}
