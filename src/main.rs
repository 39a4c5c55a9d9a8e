use anyhow::Context;
use clap::{Parser, Subcommand};
use organix_advisor::{gemini::DEFAULT_MODEL, Advisor, GeminiClient};
use organix_api::RestApi;
use organix_core::{ConfidenceGate, DEFAULT_MIN_CONFIDENCE};
use organix_storage::{build_artifacts, read_records_json, ArtifactStore, SharedCatalog};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommends organic alternatives to chemical pesticides and fertilizers
#[derive(Parser, Debug)]
#[command(name = "organix")]
#[command(about = "Organic alternative recommender", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the recommendation API
    Serve(ServeArgs),
    /// Fit a catalog from a JSON record table and write its artifacts
    Build {
        /// JSON array of records
        #[arg(long)]
        records: PathBuf,

        /// Output artifact directory
        #[arg(long, default_value = "./artifacts")]
        out: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Directory holding the catalog artifacts
    #[arg(short, long, default_value = "./artifacts")]
    artifacts_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Gemini model used for advice
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Seconds to wait for advice before falling back to a placeholder
    #[arg(long, default_value_t = 20)]
    advice_timeout_secs: u64,

    /// Minimum similarity a match must exceed
    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    min_confidence: f32,

    /// Allowed CORS origin (repeatable). Any origin when omitted.
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
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

    match args.command {
        Command::Serve(serve_args) => serve(serve_args).await,
        Command::Build { records, out } => build(records, out),
    }
}

fn build(records_path: PathBuf, out: PathBuf) -> anyhow::Result<()> {
    info!("Reading records from {:?}", records_path);
    let records = read_records_json(&records_path)
        .with_context(|| format!("reading {}", records_path.display()))?;

    let store = ArtifactStore::new(&out);
    let manifest = build_artifacts(&store, records).context("building catalog artifacts")?;
    info!(
        "Wrote {} records ({} terms) to {:?}",
        manifest.records, manifest.dimension, out
    );
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting Organix v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifacts directory: {:?}", args.artifacts_dir);
    info!("HTTP API port: {}", args.http_port);

    // Load before binding: a broken catalog must not serve traffic
    let shared = SharedCatalog::new(ArtifactStore::new(&args.artifacts_dir))
        .with_gate(ConfidenceGate::new(args.min_confidence));
    let engine = shared
        .get_or_load()
        .context("loading catalog artifacts")?;
    info!("Catalog loaded: {} records", engine.catalog().len());

    let generator = GeminiClient::new(args.api_key, args.model);
    info!("Advice model: {}", generator.model_name());
    let advisor = Arc::new(
        Advisor::new(engine, generator)
            .with_advice_timeout(Duration::from_secs(args.advice_timeout_secs)),
    );

    let http_port = args.http_port;
    let cors_origins = args.cors_origins;
    let http_handle = std::thread::spawn(move || -> std::io::Result<()> {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(advisor, http_port, cors_origins))
    });

    info!("Organix started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            let joined = joined.context("waiting for HTTP server")?;
            http_exit(joined)?;
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Surface a bind or run failure of the HTTP thread as the process error
fn http_exit(joined: std::thread::Result<std::io::Result<()>>) -> anyhow::Result<()> {
    match joined {
        Ok(Ok(())) => {
            info!("HTTP server stopped");
            Ok(())
        }
        Ok(Err(e)) => {
            error!("HTTP server error: {}", e);
            Err(e).context("running HTTP server")
        }
        Err(_) => anyhow::bail!("HTTP server thread panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_http_bind_failure_is_an_error() {
        let err = http_exit(Ok(Err(io::Error::new(
            io::ErrorKind::AddrInUse,
            "address in use",
        ))))
        .unwrap_err();
        assert!(format!("{:#}", err).contains("address in use"));
    }

    #[test]
    fn test_http_clean_stop_is_ok() {
        assert!(http_exit(Ok(Ok(()))).is_ok());
        assert!(http_exit(Err(Box::new("boom"))).is_err());
    }
}
