// Main entry point - Dependency injection and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{io, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::snapshot_repository::SnapshotRepository;
use crate::infrastructure::api_client::HttpFleetApi;
use crate::infrastructure::config::{SourceKind, load_app_config};
use crate::infrastructure::file_repository::FileSnapshotRepository;
use crate::infrastructure::http_repository::HttpSnapshotRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Cli;
use crate::presentation::handlers::handle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_app_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    let timeout = Duration::from_secs(config.api.timeout_secs);

    // Create repository (infrastructure layer)
    let repository: Arc<dyn SnapshotRepository> = match config.source.kind {
        SourceKind::Files => Arc::new(FileSnapshotRepository::new(
            &config.source.directory,
            config.source.file_template.clone(),
        )),
        SourceKind::Http => {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build HTTP client")?;
            Arc::new(HttpSnapshotRepository::new(
                config.source.base_url.clone(),
                config.source.file_template.clone(),
                client,
            ))
        }
    };
    let api = Arc::new(
        HttpFleetApi::new(&config.api.base_url, timeout).context("Failed to build fleet API client")?,
    );

    // Create services (application layer)
    let state = AppState::new(repository, api, &config);

    // Run command (presentation layer)
    let output = handle(&state, cli.command, cli.format).await?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
