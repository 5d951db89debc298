use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ephemerides::{app, config::Config, AppState};

/// Serves on-this-day historical events and the front-end that shows them.
#[derive(Debug, Parser)]
#[command(name = "ephemerides", version, about)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Verbose error pages and debug logging (overrides DEBUG)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    debug: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(host) = cli.host {
        config.app.host = host;
    }
    if let Some(port) = cli.port {
        config.app.port = port;
    }
    if let Some(debug) = cli.debug {
        config.app.debug = debug;
    }

    let json_logs = config.app.log_json;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    info!("Starting Ephemerides");
    if config.app.uses_default_secret() && !config.app.debug {
        warn!("SECRET_KEY is not set, using the development fallback");
    }

    let addr = (config.app.host.clone(), config.app.port);
    let state = AppState::new(config).context("failed to build Wikipedia client")?;
    info!(
        "Wikipedia feed template: {}",
        state.wikipedia.url_template()
    );

    let listener = tokio::net::TcpListener::bind((addr.0.as_str(), addr.1))
        .await
        .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
