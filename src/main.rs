//! channeld - channel core driven from stdin.

use channeld::config::{Config, validation};
use channeld::console::Console;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries deliveries
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    if let Err(errors) = validation::validate(&config) {
        for err in &errors {
            error!(error = %err, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    channeld::metrics::init();

    let console = Console::new(&config);
    info!(channels = console.registry().len(), "Starting channeld");

    // Reclaim speech limiters of players who went quiet (runs every minute)
    {
        let throttle = console.registry().throttle();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));
            loop {
                interval.tick().await;
                let removed = throttle.sweep();
                if removed > 0 {
                    info!(removed, "Idle speech limiters removed");
                }
            }
        });
    }

    let port = config.server.metrics_port;
    if port != 0 {
        tokio::spawn(async move {
            if let Err(e) = channeld::http::serve_metrics(port).await {
                error!(port, error = %e, "Metrics endpoint failed");
            }
        });
    }

    console
        .run(tokio::io::BufReader::new(tokio::io::stdin()))
        .await?;

    info!("Input closed, shutting down");
    Ok(())
}
