use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use hiveclock_core::config::{DEFAULT_INTERVAL_SECS, DEFAULT_URL, SessionConfig};
use hiveclock_core::logging::init_logging;
use hiveclock_core::session;

#[derive(Parser, Debug)]
#[command(
    name = "hiveclock",
    version,
    about = "Hiveclock: websocket client that publishes a clock tick to the hive"
)]
struct Cli {
    /// WebSocket endpoint to dial
    #[arg(long, default_value = DEFAULT_URL)]
    url: url::Url,

    /// Seconds between clock messages
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging();

    let cfg = SessionConfig::new(cli.url, Duration::from_secs(cli.interval_secs))?;

    let socket = session::connect(&cfg)
        .await
        .context("failed to establish websocket connection")?;

    // Runs until the connection faults; there is no reconnect policy.
    session::run(socket, cfg)
        .await
        .context("session ended with a connection fault")?;

    Ok(())
}
