use std::env;
use std::time::Duration;

use crate::adapters::stream::{DEFAULT_API_URL, DEFAULT_FAYE_URL, DEFAULT_SETUP_TIMEOUT};
use crate::domain::entities::{FeedKind, FeedRef, HistoryOrder};
use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_HISTORY_LIMIT: usize = 25;

/// Feed service connection settings
#[derive(Clone, Debug)]
pub struct StreamConfig {
    pub api_key: String,
    pub app_id: String,
    /// REST endpoint for history reads
    pub api_url: String,
    /// WebSocket endpoint for live updates
    pub faye_url: String,
    /// Limit on each step of opening a live subscription
    pub setup_timeout: Duration,
}

/// The signed-in user and their feed read tokens
#[derive(Clone, Debug)]
pub struct UserConfig {
    pub id: String,
    pub feed_token: String,
    pub timeline_token: String,
}

impl UserConfig {
    pub fn feed(&self, kind: FeedKind) -> FeedRef {
        let token = match kind {
            FeedKind::User => &self.feed_token,
            FeedKind::Timeline => &self.timeline_token,
        };
        FeedRef::new(kind, self.id.clone(), token.clone())
    }
}

#[derive(Clone, Debug)]
pub struct WallConfig {
    pub stream: StreamConfig,
    pub user: UserConfig,
    /// Web application serving `POST /tweets`
    pub base_url: String,
    /// Entries read from each feed on start
    pub history_limit: usize,
    pub history_order: HistoryOrder,
    /// Open live subscriptions
    pub realtime: bool,
}

impl WallConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let feed_token = required("FSTWEET_FEED_TOKEN")?;

        let history_limit = match lookup("FSTWEET_HISTORY_LIMIT") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "FSTWEET_HISTORY_LIMIT",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_HISTORY_LIMIT,
        };

        let history_order = match lookup("FSTWEET_HISTORY_ORDER") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "FSTWEET_HISTORY_ORDER",
                value: raw.clone(),
            })?,
            None => HistoryOrder::default(),
        };

        let setup_timeout = match lookup("STREAM_SETUP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "STREAM_SETUP_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_SETUP_TIMEOUT,
        };

        let realtime = match lookup("FSTWEET_REALTIME") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| ConfigError::Invalid {
                var: "FSTWEET_REALTIME",
                value: raw.clone(),
            })?,
            None => true,
        };

        Ok(Self {
            stream: StreamConfig {
                api_key: required("STREAM_API_KEY")?,
                app_id: required("STREAM_APP_ID")?,
                api_url: lookup("STREAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                faye_url: lookup("STREAM_FAYE_URL")
                    .unwrap_or_else(|| DEFAULT_FAYE_URL.to_string()),
                setup_timeout,
            },
            user: UserConfig {
                id: required("FSTWEET_USER_ID")?,
                timeline_token: lookup("FSTWEET_TIMELINE_TOKEN")
                    .unwrap_or_else(|| feed_token.clone()),
                feed_token,
            },
            base_url: lookup("FSTWEET_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            history_limit,
            history_order,
            realtime,
        })
    }
}
