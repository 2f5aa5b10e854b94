//! Test fixtures
//!
//! Factory functions for test data with sensible defaults.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tracing::subscriber::DefaultGuard;

use crate::config::{StreamConfig, UserConfig, WallConfig};
use crate::domain::entities::{FeedUpdate, HistoryOrder, Tweet, TweetId};

use super::RecordingWall;

/// 2017-06-01 10:00:00 UTC
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 6, 1, 10, 0, 0).unwrap()
}

/// A tweet by user 42, `offset_secs` after `base_time()`
pub fn tweet_at(text: &str, offset_secs: i64) -> Tweet {
    Tweet {
        id: TweetId::new(),
        text: text.to_string(),
        actor: "42".to_string(),
        author: None,
        time: base_time() + chrono::Duration::seconds(offset_secs),
    }
}

/// A live update carrying `tweets` as its new list
pub fn update_of(tweets: Vec<Tweet>) -> FeedUpdate {
    FeedUpdate {
        new: tweets,
        deleted: Vec::new(),
    }
}

pub fn test_config() -> WallConfig {
    WallConfig {
        stream: StreamConfig {
            api_key: "test-api-key".to_string(),
            app_id: "1234".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            faye_url: "ws://127.0.0.1:1/faye".to_string(),
            setup_timeout: Duration::from_secs(2),
        },
        user: UserConfig {
            id: "42".to_string(),
            feed_token: "user-token".to_string(),
            timeline_token: "timeline-token".to_string(),
        },
        base_url: "http://127.0.0.1:1".to_string(),
        history_limit: 25,
        history_order: HistoryOrder::OldestFirst,
        realtime: true,
    }
}

/// Wait until the wall holds at least `count` tweets
pub async fn wait_for_wall(wall: &RecordingWall, count: usize) {
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        while wall.len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(
        waited.is_ok(),
        "wall has {} tweets, expected {}",
        wall.len(),
        count
    );
}

/// Poll `check` until it holds, failing the test after two seconds
pub async fn eventually<C>(what: &str, check: C)
where
    C: Fn() -> bool,
{
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}

/// Log output captured by `capture_logs`
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Send this thread's log output to a buffer until the guard is dropped
pub fn capture_logs() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    (tracing::subscriber::set_default(subscriber), buffer)
}
