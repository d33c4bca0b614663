//! cursor-sim server binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cursor_sim_server::config::{AuthConfig, LoggingConfig, Mode, ServerConfig, Velocity};
use cursor_sim_server::run_with_shutdown;

#[derive(Parser)]
#[command(name = "cursor-sim")]
#[command(about = "A deterministic, self-contained simulator of engineering and AI-adoption telemetry")]
#[command(version)]
struct Args {
    /// Generate a fresh corpus at startup, or load one from disk and serve it read-only.
    #[arg(long, value_enum, default_value = "runtime")]
    mode: Mode,

    /// Seed document path (required in runtime mode).
    #[arg(long, env = "CURSOR_SIM_SEED")]
    seed: Option<PathBuf>,

    /// Corpus file path to load (required in replay mode).
    #[arg(long, env = "CURSOR_SIM_CORPUS")]
    corpus: Option<PathBuf>,

    /// Where to persist the generated corpus after a runtime-mode run.
    #[arg(long, env = "CURSOR_SIM_CORPUS_OUT")]
    corpus_out: Option<PathBuf>,

    /// Listen port.
    #[arg(long, env = "CURSOR_SIM_PORT", default_value_t = 8080)]
    port: u16,

    /// Number of days to simulate (runtime mode only).
    #[arg(long, env = "CURSOR_SIM_DAYS", default_value_t = 30)]
    days: u32,

    /// Commit/activity velocity (runtime mode only).
    #[arg(long, value_enum, env = "CURSOR_SIM_VELOCITY", default_value = "medium")]
    velocity: Velocity,

    /// Hard cap on generated commits; 0 means unbounded.
    #[arg(long, env = "CURSOR_SIM_MAX_COMMITS", default_value_t = 0)]
    max_commits: u64,

    /// Explicit PRNG seed, overriding any seed carried in the seed document.
    #[arg(long, env = "CURSOR_SIM_PRNG_SEED")]
    prng_seed: Option<u64>,

    /// Static credential required on every request. Unset accepts any non-empty credential.
    #[arg(long, env = "CURSOR_SIM_STATIC_CREDENTIAL")]
    static_credential: Option<String>,

    /// Log level.
    #[arg(long, env = "CURSOR_SIM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON instead of pretty-printed text.
    #[arg(long, env = "CURSOR_SIM_JSON_LOGS")]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            mode: args.mode,
            seed_path: args.seed,
            corpus_path: args.corpus,
            corpus_out_path: args.corpus_out,
            port: args.port,
            days: args.days,
            velocity: args.velocity,
            max_commits: args.max_commits,
            prng_seed: args.prng_seed,
            auth: AuthConfig { static_credential: args.static_credential },
            logging: LoggingConfig { level: args.log_level, json: args.json_logs },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level, args.json_logs);

    let config: ServerConfig = args.into();
    if let Err(e) = config.validate() {
        error!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    info!(mode = ?config.mode, port = config.port, "starting cursor-sim");

    let startup_cancel = CancellationToken::new();
    let cancel_on_signal = startup_cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    let shutdown = async move {
        let ctrl_c = async {
            signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("received Ctrl+C, shutting down"),
            _ = terminate => info!("received SIGTERM, shutting down"),
        }
    };

    if let Err(e) = run_with_shutdown(config, startup_cancel, shutdown).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    info!("server stopped");
    ExitCode::SUCCESS
}
