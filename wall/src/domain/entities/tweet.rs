//! Tweet domain entity
//!
//! A tweet as the feed service delivers it: an activity carrying the post
//! text in its `tweet` field. Tweets are never modified on the client.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Activity id assigned by the feed service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(pub Uuid);

impl TweetId {
    #[cfg(test)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TweetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single post on the wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: TweetId,
    /// Post text
    #[serde(rename = "tweet", default)]
    pub text: String,
    /// Activity actor (the author's user id)
    #[serde(default)]
    pub actor: String,
    /// Display name attached by the web application, if any
    #[serde(rename = "username", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "deserialize_feed_time")]
    pub time: DateTime<Utc>,
}

impl Tweet {
    /// Name to show next to the tweet
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(&self.actor)
    }
}

/// Body of a post creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTweet {
    pub post: String,
}

impl NewTweet {
    pub fn new(post: impl Into<String>) -> Self {
        Self { post: post.into() }
    }
}

/// Parse an activity timestamp.
///
/// The feed service sends naive ISO-8601 times (`2017-06-01T10:12:03.123456`)
/// that are UTC. RFC 3339 strings with an offset are accepted as well.
pub fn parse_feed_time(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(time) => Ok(time.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.and_utc()),
    }
}

fn deserialize_feed_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_feed_time(&raw).map_err(serde::de::Error::custom)
}
