use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vaani::{Config, MediaPipeline};

#[derive(Parser)]
#[command(name = "vaani")]
#[command(version, about = "Media transcription, translation and summarization service")]
#[command(
    long_about = "Accepts uploaded audio/video, transcribes English or Hindi speech, \
translates the transcript to English and Bengali, and produces extractive summaries."
)]
struct Cli {
    /// Address to bind the HTTP server to (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    config
        .validate()
        .context("Configuration validation failed")?;

    info!("Speech API:    {}", config.speech_api_url);
    info!("Translate API: {}", config.translate_api_url);

    let pipeline = Arc::new(MediaPipeline::from_config(&config));
    let app = vaani::server::router(pipeline);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
