mod lyrics;
mod mpris;
mod pool;
mod state;
mod timer;
mod ui;

use clap::Parser;
use std::error::Error;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// MPRIS service name of the player to follow (default: first one found)
    #[arg(long)]
    player: Option<String>,
    /// Player poll interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,
    /// Enable backend debug logging to stderr
    #[arg(long)]
    pub debug_log: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cfg = Config::parse();
    if cfg.debug_log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("lyricterm=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    // Start the UI even if no player is up yet; the poll loop keeps looking
    // and the UI shows a waiting screen until a track appears.
    let service = match cfg.player.clone() {
        Some(service) => service,
        None => match mpris::discover_player_service().await {
            Ok(service) => service.unwrap_or_default(),
            Err(e) => {
                tracing::debug!(error = %e, "player discovery failed");
                String::new()
            }
        },
    };

    let result = ui::app::run(Duration::from_millis(cfg.poll_interval_ms), service).await;

    // Print error if any, for better diagnostics
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}
