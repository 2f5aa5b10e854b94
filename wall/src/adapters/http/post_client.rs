//! HTTP client for the tweet creation endpoint

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::domain::entities::NewTweet;
use crate::domain::ports::PostApi;
use crate::error::PostError;

/// Posts tweets to `POST {base_url}/tweets`
#[derive(Clone)]
pub struct HttpPostClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostClient {
    pub fn new(base_url: &str) -> Result<Self, PostError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tweets_url(&self) -> String {
        format!("{}/tweets", self.base_url)
    }
}

#[async_trait]
impl PostApi for HttpPostClient {
    async fn create_tweet(&self, tweet: &NewTweet) -> Result<(), PostError> {
        let response = self.client.post(self.tweets_url()).json(tweet).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(PostError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}
