use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cr_engine::embedding::{Embedder, HashEmbedder};
use cr_engine::logging;
use cr_engine::session::{run_session, SessionCandidate, SessionOptions};
use cr_engine::{EngineError, JobProfile, MatchConfig};
use dotenvy::dotenv;
use tracing::{error, info};

/// Scores a candidate set against one job and prints ranked results as
/// JSON. Profiles come from local files; persistence stays with the
/// caller.
#[derive(Debug, Parser)]
#[command(name = "cr-worker")]
struct Args {
    /// Path to the job profile JSON.
    #[arg(long)]
    job: PathBuf,

    /// Path to the candidates JSON (array of session candidates).
    #[arg(long)]
    candidates: PathBuf,

    /// Compute embeddings with the built-in hash embedder for profiles
    /// that arrive without one.
    #[arg(long)]
    embed: bool,

    /// Hash embedder dimension.
    #[arg(long, default_value_t = 256)]
    embed_dim: usize,

    /// Budget per embedding call, in seconds.
    #[arg(long, default_value_t = 10)]
    embed_timeout_secs: u64,

    /// Maximum concurrent scoring tasks (0 = auto).
    #[arg(long, default_value_t = 0)]
    concurrency: usize,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let job: JobProfile = serde_json::from_str(&std::fs::read_to_string(&args.job)?)?;
    let candidates: Vec<SessionCandidate> =
        serde_json::from_str(&std::fs::read_to_string(&args.candidates)?)?;

    let config = MatchConfig::from_env();
    let embedder: Option<Arc<dyn Embedder>> = if args.embed {
        let embedder = HashEmbedder::new(args.embed_dim);
        info!(
            embedder = embedder.name(),
            version = embedder.version(),
            dimension = embedder.dimension(),
            "embedding enabled"
        );
        Some(Arc::new(embedder))
    } else {
        None
    };

    let options = SessionOptions {
        embedder,
        embed_timeout_secs: args.embed_timeout_secs,
        concurrency: args.concurrency,
        progress: Some(Arc::new(|processed: usize, total: usize| {
            info!(processed, total, "progress");
        })),
        ..SessionOptions::default()
    };

    let outcome = match run_session(job, candidates, config, options).await {
        Ok(outcome) => outcome,
        Err(EngineError::MissingJobProfile { session }) => {
            error!(session_id = %session.id, status = session.status.as_str(), "session failed");
            std::process::exit(2);
        }
        Err(err) => return Err(err.into()),
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{rendered}");

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    logging::init_tracing_subscriber("cr-worker");
    logging::install_tracing_panic_hook("cr-worker");

    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!(error = %err, "worker failed");
        std::process::exit(1);
    }
}
