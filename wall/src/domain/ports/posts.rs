//! Post endpoint port

use async_trait::async_trait;

use crate::domain::entities::NewTweet;
use crate::error::PostError;

/// The web application's tweet creation endpoint
#[async_trait]
pub trait PostApi: Send + Sync {
    /// Create a tweet. A single attempt, no retry.
    async fn create_tweet(&self, tweet: &NewTweet) -> Result<(), PostError>;
}
