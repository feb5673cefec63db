use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use locale_router::OnLocaleResolved;
use locale_router::config::{Config, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "locale-router", version, about = "URL-prefix locale routing demo server")]
struct Args {
    /// Path to config.toml (default: conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::load_reported(args.config.as_deref(), std::io::stderr)?;
    let _guard = init_logging(&config.logging);

    let on_locale_resolved = OnLocaleResolved::new(|code, request, _| {
        tracing::trace!("Locale {} ready for {} {}", code, request.method, request.original_uri);
    });
    let routing = config.locale.build_routing(on_locale_resolved)?;

    tracing::info!(
        "Locale routing: default={}, available={:?}",
        routing.default_locale(),
        routing.available().codes()
    );

    let app = locale_router::build_app(&routing);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Console logging, plus a daily rolling file when `logging.file` is set.
/// The returned guard must live as long as the program.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "locale-router.log".to_string());

            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            registry.with(fmt::layer().with_ansi(false).with_writer(writer)).init();
            Some(guard)
        },
        None => {
            registry.init();
            None
        },
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutting down");
}
