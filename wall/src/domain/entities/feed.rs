//! Feed domain types
//!
//! A feed is identified by its kind (slug), the owning user id and a
//! read token issued by the web application.

use serde::Deserialize;

use super::Tweet;

/// Feed group a subscription reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Tweets authored by the user
    User,
    /// Tweets of the accounts the user follows
    Timeline,
}

impl FeedKind {
    pub fn slug(&self) -> &'static str {
        match self {
            FeedKind::User => "user",
            FeedKind::Timeline => "timeline",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(FeedKind::User),
            "timeline" => Ok(FeedKind::Timeline),
            _ => Err(format!("Unknown feed kind: {}", s)),
        }
    }
}

/// Everything needed to read one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRef {
    pub kind: FeedKind,
    pub user_id: String,
    pub token: String,
}

impl FeedRef {
    pub fn new(kind: FeedKind, user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            kind,
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    /// `slug:user_id`, the id the feed service uses for this feed
    pub fn feed_id(&self) -> String {
        format!("{}:{}", self.kind.slug(), self.user_id)
    }
}

/// One page of feed history
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub results: Vec<Tweet>,
}

/// Real-time notification pushed for a feed
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedUpdate {
    #[serde(default)]
    pub new: Vec<Tweet>,
    #[serde(default)]
    pub deleted: Vec<String>,
}

impl FeedUpdate {
    /// The single tweet the wall renders for this notification
    pub fn into_newest(self) -> Option<Tweet> {
        self.new.into_iter().next()
    }
}

/// Display order of the initial history batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryOrder {
    /// Sort newest first, then reverse: the oldest tweet of the window on top
    #[default]
    OldestFirst,
    NewestFirst,
}

impl std::str::FromStr for HistoryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oldest-first" | "oldest_first" => Ok(HistoryOrder::OldestFirst),
            "newest-first" | "newest_first" => Ok(HistoryOrder::NewestFirst),
            _ => Err(format!("Unknown history order: {}", s)),
        }
    }
}
