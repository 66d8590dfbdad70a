use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vibematch_api::{AppState, RestApi};
use vibematch_core::{HashingEmbedder, LexicalKeywordExtractor, MatchConfig, MatchOrchestrator};
use vibematch_storage::StorageManager;

/// Voice-profile matchmaking service
#[derive(Parser, Debug)]
#[command(name = "vibematch")]
#[command(about = "Match users by transcript similarity", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, env = "VIBEMATCH_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Keep everything in memory instead of LMDB
    #[arg(long, env = "VIBEMATCH_IN_MEMORY")]
    in_memory: bool,

    /// HTTP API port
    #[arg(long, env = "VIBEMATCH_HTTP_PORT", default_value_t = 9000)]
    http_port: u16,

    /// Days before a matched pair can be matched again (0 disables the cooldown)
    #[arg(long, env = "VIBEMATCH_COOLDOWN_DAYS", default_value_t = 0)]
    cooldown_days: u32,

    /// Dimension of embeddings computed for uploads without one
    #[arg(long, env = "VIBEMATCH_EMBEDDING_DIM", default_value_t = vibematch_core::DEFAULT_EMBEDDING_DIM)]
    embedding_dim: usize,

    /// Log level
    #[arg(long, env = "VIBEMATCH_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
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

    info!("Starting vibematch v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);
    info!("Cooldown: {} day(s)", args.cooldown_days);

    let storage = if args.in_memory {
        StorageManager::in_memory()
    } else {
        info!("Data directory: {:?}", args.data_dir);
        StorageManager::new(&args.data_dir)?
    };
    info!("Storage initialized");

    let config = MatchConfig::default().with_cooldown_days(args.cooldown_days);
    let orchestrator = MatchOrchestrator::new(
        storage.profiles(),
        storage.match_log(),
        Arc::new(LexicalKeywordExtractor::new()),
        &config,
    )?;

    let state = Arc::new(AppState {
        orchestrator,
        profiles: storage.profiles(),
        embedder: Arc::new(HashingEmbedder::new(args.embedding_dim)),
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);
    actix_web::rt::System::new().block_on(RestApi::start(state, args.http_port))?;

    info!("Shutting down...");
    Ok(())
}
