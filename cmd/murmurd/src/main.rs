//! murmurd — text-to-speech serving daemon.

use std::path::PathBuf;

use clap::Parser;
use murmur_server::Config;

/// Text-to-speech serving daemon.
///
/// Accepts connections immediately; the synthesis model loads in the
/// background, and requests are rejected with a retryable status until it
/// is ready.
#[derive(Parser)]
#[command(name = "murmurd")]
#[command(about = "Text-to-speech serving daemon")]
#[command(version)]
struct Cli {
    /// Listen port (overrides MURMUR_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Hub repository holding the exported model
    #[arg(long)]
    model_repo: Option<String>,

    /// Model file within the repository
    #[arg(long)]
    model_file: Option<String>,

    /// Model revision (defaults to the repository head)
    #[arg(long)]
    revision: Option<String>,

    /// Frontend origin allowed by CORS
    #[arg(long)]
    allow_origin: Option<String>,

    /// Directory for generated audio files (defaults to the system temp dir)
    #[arg(long)]
    artifact_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(repo) = cli.model_repo {
        config.model_repo = repo;
    }
    if let Some(file) = cli.model_file {
        config.model_file = file;
    }
    if let Some(revision) = cli.revision {
        config.model_revision = Some(revision);
    }
    if let Some(origin) = cli.allow_origin {
        config.allow_origin = origin;
    }
    if let Some(dir) = cli.artifact_dir {
        config.artifact_dir = dir;
    }

    murmur_server::serve(config).await?;
    Ok(())
}
