use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use hpoapi::config::Settings;
use hpoapi::{controller, create_context, Result};

#[derive(Debug, Parser)]
#[command(name = "hpoapi", about = "HTTP query service for a phenotype ontology")]
struct Args {
    /// Address to bind, overrides HPOAPI_HOST.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides HPOAPI_PORT.
    #[arg(long)]
    port: Option<u16>,

    /// Path to the JSON ontology dump, overrides HPOAPI_DATA_FILE.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut settings = Settings::from_env()?;
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(data) = args.data {
        settings.data_file = Some(data);
    }

    let addr = format!("{}:{}", settings.host, settings.port);
    let ctx = create_context(settings)?;
    let router = controller::router(ctx)?;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install terminate handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutting down");
}
