//! Feed service client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::config::StreamConfig;
use crate::domain::entities::{FeedPage, FeedRef};
use crate::domain::ports::{FeedClient, FeedSubscription};
use crate::error::FeedError;

use super::realtime;

pub const DEFAULT_API_URL: &str = "https://api.stream-io-api.com";
pub const DEFAULT_FAYE_URL: &str = "wss://faye-us-east.stream-io-api.com/faye";
/// Limit on each step of opening a live subscription
pub const DEFAULT_SETUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-side style client: authenticated by per-feed read tokens, never
/// by the API secret.
pub struct StreamFeedClient {
    http: Client,
    api_key: String,
    app_id: String,
    api_url: String,
    faye_url: String,
    setup_timeout: Duration,
}

impl StreamFeedClient {
    /// Set up a client for an application.
    ///
    /// `secret` is accepted for parity with server-side clients but never
    /// sent anywhere.
    pub fn connect(api_key: &str, secret: Option<&str>, app_id: &str) -> Result<Self, FeedError> {
        if secret.is_some() {
            tracing::warn!("Ignoring feed API secret, reads use feed tokens");
        }

        let http = Client::builder()
            .user_agent(concat!("fstweet-wall/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            app_id: app_id.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            faye_url: DEFAULT_FAYE_URL.to_string(),
            setup_timeout: DEFAULT_SETUP_TIMEOUT,
        })
    }

    pub fn from_config(config: &StreamConfig) -> Result<Self, FeedError> {
        Ok(Self::connect(&config.api_key, None, &config.app_id)?
            .with_api_url(&config.api_url)
            .with_faye_url(&config.faye_url)
            .with_setup_timeout(config.setup_timeout))
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_faye_url(mut self, faye_url: &str) -> Self {
        self.faye_url = faye_url.to_string();
        self
    }

    pub fn with_setup_timeout(mut self, setup_timeout: Duration) -> Self {
        self.setup_timeout = setup_timeout;
        self
    }

    fn feed_url(&self, feed: &FeedRef) -> String {
        format!(
            "{}/api/v1.0/feed/{}/{}/",
            self.api_url,
            feed.kind.slug(),
            encode(&feed.user_id)
        )
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FeedError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FeedError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(FeedError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(FeedError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FeedError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl FeedClient for StreamFeedClient {
    async fn get(&self, feed: &FeedRef, limit: usize) -> Result<FeedPage, FeedError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(self.feed_url(feed))
            .query(&[("api_key", self.api_key.as_str()), ("limit", limit.as_str())])
            .header(AUTHORIZATION, feed.token.as_str())
            .header("stream-auth-type", "jwt")
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn subscribe(&self, feed: &FeedRef) -> Result<FeedSubscription, FeedError> {
        realtime::subscribe(
            &self.faye_url,
            &self.app_id,
            &self.api_key,
            feed,
            self.setup_timeout,
        )
        .await
    }
}
