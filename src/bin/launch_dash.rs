//! launch-dash: serve the launch records dashboard over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use launch_dash::config::DashboardConfig;
use launch_dash::controller::DashboardController;
use launch_dash::core::{DataSource, Dataset};
use launch_dash::server::{self, AppState};
use launch_dash::telemetry;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

#[derive(Debug, Parser)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard with linked pie and scatter charts")]
#[command(version)]
struct Cli {
    /// TOML config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset CSV, as a local path or an http(s) URL
    #[arg(short, long)]
    source: Option<String>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    let _ = telemetry::init_default_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_path(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(source) = cli.source {
        config.source = DataSource::parse(&source);
    }
    if let Some(host) = cli.host {
        config.bind.host = host;
    }
    if let Some(port) = cli.port {
        config.bind.port = port;
    }

    // Blocking fetch; must finish before the async runtime exists.
    let dataset = Dataset::load_with(&config.source, &config.load_options())
        .with_context(|| format!("loading dataset from `{}`", config.source))?;
    let controller = DashboardController::new(Arc::new(dataset), config.style.clone());
    let state = AppState::new(controller, &config.layout);

    let addrs = config.bind.socket_addrs()?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        let listener = TcpListener::bind(addrs.as_slice())
            .await
            .with_context(|| format!("binding {}", config.bind.address()))?;
        server::serve(listener, state).await?;
        Ok::<(), anyhow::Error>(())
    })
}
