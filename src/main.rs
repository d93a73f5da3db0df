use clap::Parser;
use dermadx_api::{AppState, DiagnosisStats, RestApi};
use dermadx_classifier::{SubstringMatcher, TextClassifier, VotePolicy};
use dermadx_embed::{HashEmbedder, RemoteEmbedder, TextEmbedder, DEFAULT_HASH_DIM};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Diagnose dog skin conditions from symptom descriptions
#[derive(Parser, Debug)]
#[command(name = "dermadx")]
#[command(about = "A dog skin condition diagnosis service", long_about = None)]
struct Args {
    /// Path to the reference store snapshot
    #[arg(short, long, default_value = "./data/reference.snapshot")]
    snapshot: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Vote aggregation policy: top-k-sum or global-max
    #[arg(long, default_value = "top-k-sum")]
    policy: String,

    /// Embedding backend: hash or remote
    #[arg(long, default_value = "hash")]
    embedder: String,

    /// Endpoint of the remote embedding service (required with --embedder remote)
    #[arg(long)]
    embed_url: Option<String>,

    /// Embedding dimensionality
    #[arg(long, default_value_t = DEFAULT_HASH_DIM)]
    embed_dim: usize,

    /// Deadline for one classification, in seconds
    #[arg(long, default_value_t = 10)]
    embed_timeout_secs: u64,

    /// JSON file overriding the built-in keyword trigger table
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting dermadx v{}", env!("CARGO_PKG_VERSION"));
    info!("Snapshot: {:?}", args.snapshot);
    info!("HTTP API port: {}", args.http_port);

    let policy = match args.policy.as_str() {
        "global-max" | "global_max" => VotePolicy::GlobalMax,
        _ => VotePolicy::TopKSum,
    };
    info!("Vote policy: {:?}", policy);

    let embed_timeout = Duration::from_secs(args.embed_timeout_secs);

    let embedder: Arc<dyn TextEmbedder> = match args.embedder.as_str() {
        "remote" => {
            let url = args
                .embed_url
                .ok_or_else(|| anyhow::anyhow!("--embed-url is required with --embedder remote"))?;
            info!("Embedder: remote service at {}", url);
            Arc::new(RemoteEmbedder::new(url, args.embed_dim, embed_timeout)?)
        }
        _ => {
            info!("Embedder: feature hashing, dim {}", args.embed_dim);
            Arc::new(HashEmbedder::new(args.embed_dim))
        }
    };

    let matcher = match &args.keywords {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let table: HashMap<String, Vec<String>> = serde_json::from_str(&raw)?;
            info!("Keyword table loaded from {:?}", path);
            SubstringMatcher::from_labeled_table(table)?
        }
        None => SubstringMatcher::builtin(),
    };

    // A missing or corrupt snapshot must not kill the process; the API
    // stays up and reports the classifier as unavailable.
    let (classifier, snapshot) = match dermadx_storage::load_store(&args.snapshot) {
        Ok(loaded) => {
            info!(
                records = loaded.store.len(),
                dim = loaded.store.dim(),
                skipped = loaded.skipped,
                "reference store loaded"
            );
            let description =
                dermadx_storage::describe(&args.snapshot, loaded.store.len(), loaded.store.dim())
                    .ok();
            match TextClassifier::new(
                Arc::new(loaded.store),
                embedder,
                Box::new(matcher),
                policy,
            ) {
                Ok(classifier) => (Some(Arc::new(classifier)), description),
                Err(e) => {
                    error!(error = %e, "failed to build classifier");
                    (None, description)
                }
            }
        }
        Err(e) => {
            error!(error = %e, "reference store unavailable");
            (None, None)
        }
    };

    let state = Arc::new(AppState {
        classifier,
        embed_timeout,
        snapshot,
        stats: DiagnosisStats::new(),
    });

    let state_http = state.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("dermadx started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
