use std::io::Write;

use anyhow::Result;
use blueprint_core::{GenerationError, ProjectSpec};
use blueprint_llm::CompletionClient;
use blueprint_store::{create_store, StoreConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::options::GenerationOptions;
use crate::run::run_project;
use crate::synthesize::synthesize;

/// The interactive loop: read a description, show the synthesized spec, and
/// generate the project once the user answers `y`.
///
/// Ends on `exit`, end of input, or when `shutdown` is cancelled. Failed
/// requests are reported and the loop carries on; nothing is retried.
pub async fn run_session<R, W>(
    client: &dyn CompletionClient,
    store_config: &StoreConfig,
    options: &GenerationOptions,
    shutdown: &CancellationToken,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "🧞 Blueprint project generator (type 'exit' to quit)")?;
    writeln!(out, "-------------------------------------------")?;
    writeln!(out, "Describe what you want to build and I'll generate it.")?;
    writeln!(
        out,
        "Example: 'Create a React dashboard with authentication, dark mode, and real-time charts'"
    )?;
    writeln!(out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "Project description: ")?;
        out.flush()?;
        let Some(line) = next_line(&mut lines, shutdown).await? else {
            break;
        };
        let request = line.trim();
        if request == "exit" {
            break;
        }
        if request.is_empty() {
            continue;
        }

        let spec = match synthesize(client, request, options, shutdown).await {
            Ok(spec) => spec,
            Err(e) => {
                error!("spec synthesis failed: {e}");
                writeln!(out, "Error generating project specification: {e}")?;
                continue;
            }
        };

        writeln!(out, "\n📋 Project Specification:")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&spec)?)?;
        write!(out, "\nProceed with generation? (y/n): ")?;
        out.flush()?;

        let Some(confirm) = next_line(&mut lines, shutdown).await? else {
            break;
        };
        if confirm.trim().eq_ignore_ascii_case("y") {
            generate(client, &spec, store_config, options, shutdown, out).await?;
        }
        writeln!(out)?;
    }
    Ok(())
}

async fn next_line<R>(
    lines: &mut Lines<R>,
    shutdown: &CancellationToken,
) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => Ok(None),
        line = lines.next_line() => Ok(line?),
    }
}

async fn generate<W: Write>(
    client: &dyn CompletionClient,
    spec: &ProjectSpec,
    store_config: &StoreConfig,
    options: &GenerationOptions,
    shutdown: &CancellationToken,
    out: &mut W,
) -> Result<()> {
    let store = match create_store(store_config, &spec.name) {
        Ok(store) => store,
        Err(e) => {
            error!("cannot create project store: {e}");
            writeln!(out, "Error generating project: {e}")?;
            return Ok(());
        }
    };
    let project_dir = store_config.output_dir().join(&spec.name);

    writeln!(out, "🚀 Generating project: {}", spec.name)?;
    writeln!(out, "📋 Type: {} using {}", spec.kind, spec.framework)?;
    writeln!(out, "📁 Generating {} files...", spec.artifacts.len())?;
    out.flush()?;

    match run_project(client, spec, &*store, options, shutdown).await {
        Ok(report) => {
            debug!(report = %serde_json::to_string(&report)?, "run report");
            writeln!(
                out,
                "✨ Project generated successfully in {} ({} files + {})",
                project_dir.display(),
                report.artifacts.len(),
                report.summary
            )?;
        }
        Err(e) => {
            error!("generation failed: {e}");
            writeln!(out, "Error generating project: {e}")?;
            if !matches!(e, GenerationError::Validation { .. }) {
                writeln!(
                    out,
                    "Files written before the failure were kept in {}",
                    project_dir.display()
                )?;
            }
        }
    }
    Ok(())
}
