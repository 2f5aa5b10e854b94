//! FsTweet wall client
//!
//! Shows the signed-in user's wall: the latest tweets of their user and
//! timeline feeds followed by live updates. Every line typed on stdin is
//! posted as a new tweet.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;

#[cfg(test)]
mod test_utils;


use adapters::{HttpPostClient, StreamFeedClient, TerminalNotifier, TerminalWall};
use app::WallController;
use config::WallConfig;
use domain::entities::SubmitEvent;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout is the wall
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fstweet_wall=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting FsTweet wall...");

    let config = WallConfig::from_env().context("Failed to load configuration")?;

    let posts = Arc::new(
        HttpPostClient::new(&config.base_url).context("Failed to build HTTP client")?,
    );
    let feeds = Arc::new(
        StreamFeedClient::from_config(&config.stream).context("Failed to build feed client")?,
    );

    let controller = WallController::new(
        config,
        posts,
        feeds,
        Arc::new(TerminalWall::new()),
        Arc::new(TerminalNotifier),
    );

    let session = controller.start().await;
    tracing::info!(live_feeds = session.live_feeds(), "Wall ready, type a tweet and press enter");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(text) = line.context("Failed to read stdin")? else {
                    break;
                };
                let mut event = SubmitEvent::new(text);
                let outcome = controller.submit(&mut event).await;
                tracing::debug!(posted = outcome.is_posted(), "Submission handled");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    session.close();
    Ok(())
}
