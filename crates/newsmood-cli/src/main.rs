mod report;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use newsmood_pipeline::{MistralClient, Pipeline, SerpApiClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsmood")]
#[command(about = "Search news headlines and classify their sentiment")]
struct Cli {
    /// Search query, e.g. "cancer cure discovery"
    query: String,

    /// Print the final state as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Include search and per-headline diagnostics in the JSON output
    #[arg(long, requires = "json")]
    diagnostics: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = newsmood_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let search = SerpApiClient::from_config(&config).context("failed to build search client")?;
    let classifier =
        MistralClient::from_config(&config).context("failed to build model client")?;
    let pipeline = Pipeline::new(search, classifier);

    tracing::info!(query = %cli.query, "starting pipeline");
    let (state, diagnostics) = pipeline
        .invoke_with_diagnostics(&cli.query)
        .await
        .context("pipeline failed")?;

    let generated_at = Utc::now();
    if cli.json {
        let diagnostics = cli.diagnostics.then_some(&diagnostics);
        let payload = report::render_json(&state, diagnostics, generated_at)
            .context("failed to serialize report")?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", report::TextReport::new(&state, generated_at));
    }

    Ok(())
}

/// Install the fmt subscriber, logging to stderr so stdout stays parseable.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
