use anyhow::Result;
use blueprint_llm::OpenAiClient;
use blueprint_runner::config::GeneratorConfig;
use blueprint_runner::session::run_session;
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GeneratorConfig::parse();
    let client = OpenAiClient::new(config.api_key.clone(), config.model.clone())?
        .with_endpoint(&config.base_url);
    info!("blueprint starting");
    info!("endpoint: {}", client.endpoint());
    info!("output: {}", config.output_dir.display());

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping after the current step");
                shutdown.cancel();
            }
        });
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(
        &client,
        &config.store_config(),
        &config.options(),
        &shutdown,
        stdin,
        &mut stdout,
    )
    .await?;

    if shutdown.is_cancelled() {
        // The stdin reader thread may still be blocked on a read.
        std::process::exit(130);
    }
    Ok(())
}
