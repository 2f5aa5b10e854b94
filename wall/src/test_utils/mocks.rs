//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::domain::entities::{FeedKind, FeedPage, FeedRef, FeedUpdate, NewTweet, Notice, Tweet};
use crate::domain::ports::{FeedClient, FeedEvent, FeedSubscription, Notifier, PostApi, Wall};
use crate::error::{FeedError, PostError};

// ============================================================================
// Mock Post API
// ============================================================================

#[derive(Default)]
pub struct MockPostApi {
    failure: Option<(u16, String)>,
    posted: RwLock<Vec<NewTweet>>,
}

impl MockPostApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails with the given status and response body
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    pub fn posted(&self) -> Vec<NewTweet> {
        self.posted.read().unwrap().clone()
    }
}

#[async_trait]
impl PostApi for MockPostApi {
    async fn create_tweet(&self, tweet: &NewTweet) -> Result<(), PostError> {
        self.posted.write().unwrap().push(tweet.clone());

        match &self.failure {
            None => Ok(()),
            Some((status, body)) => Err(PostError::Api {
                status: *status,
                status_text: reqwest::StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
                body: body.clone(),
            }),
        }
    }
}

// ============================================================================
// Mock Feed Client
// ============================================================================

#[derive(Default)]
pub struct MockFeedClient {
    pages: HashMap<FeedKind, Vec<Tweet>>,
    failing_pages: HashSet<FeedKind>,
    failing_subscribes: HashSet<FeedKind>,
    stalled_subscribes: HashSet<FeedKind>,
    queued: HashMap<FeedKind, Vec<FeedUpdate>>,
    get_calls: RwLock<Vec<(FeedKind, usize)>>,
    subscribed: RwLock<Vec<FeedKind>>,
    senders: RwLock<HashMap<FeedKind, mpsc::Sender<FeedEvent>>>,
}

impl MockFeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// History page returned for a feed
    pub fn with_page(mut self, kind: FeedKind, tweets: Vec<Tweet>) -> Self {
        self.pages.insert(kind, tweets);
        self
    }

    pub fn with_failing_page(mut self, kind: FeedKind) -> Self {
        self.failing_pages.insert(kind);
        self
    }

    pub fn with_failing_subscribe(mut self, kind: FeedKind) -> Self {
        self.failing_subscribes.insert(kind);
        self
    }

    /// Subscribing to this feed never completes
    pub fn with_stalled_subscribe(mut self, kind: FeedKind) -> Self {
        self.stalled_subscribes.insert(kind);
        self
    }

    /// Update already waiting when the subscription opens
    pub fn with_queued_update(mut self, kind: FeedKind, update: FeedUpdate) -> Self {
        self.queued.entry(kind).or_default().push(update);
        self
    }

    pub fn get_calls(&self) -> Vec<(FeedKind, usize)> {
        self.get_calls.read().unwrap().clone()
    }

    pub fn subscribed(&self) -> Vec<FeedKind> {
        self.subscribed.read().unwrap().clone()
    }

    /// Sender of an open subscription, waiting for it to be opened
    async fn sender(&self, kind: FeedKind) -> mpsc::Sender<FeedEvent> {
        let opened = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let sender = self.senders.read().unwrap().get(&kind).cloned();
                if let Some(sender) = sender {
                    return sender;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        opened.expect("feed was never subscribed")
    }

    /// Deliver a live update on an open subscription
    pub async fn push(&self, kind: FeedKind, update: FeedUpdate) {
        let sender = self.sender(kind).await;
        sender.send(Ok(update)).await.expect("subscription closed");
    }

    /// End a subscription with a transport error
    pub async fn fail(&self, kind: FeedKind, error: FeedError) {
        let sender = self.sender(kind).await;
        sender.send(Err(error)).await.expect("subscription closed");
    }

    /// Drop the transport side of a subscription without a reason
    pub async fn disconnect(&self, kind: FeedKind) {
        self.sender(kind).await;
        self.senders.write().unwrap().remove(&kind);
    }

    /// Whether the subscriber side of a feed has gone away
    pub async fn receiver_closed(&self, kind: FeedKind) -> bool {
        let sender = match self.senders.read().unwrap().get(&kind).cloned() {
            Some(sender) => sender,
            None => return true,
        };
        tokio::time::timeout(Duration::from_secs(2), sender.closed())
            .await
            .is_ok()
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn get(&self, feed: &FeedRef, limit: usize) -> Result<FeedPage, FeedError> {
        self.get_calls.write().unwrap().push((feed.kind, limit));

        if self.failing_pages.contains(&feed.kind) {
            return Err(FeedError::Api {
                status: 500,
                message: "feed unavailable".to_string(),
            });
        }

        let results = self
            .pages
            .get(&feed.kind)
            .map(|tweets| tweets.iter().take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(FeedPage { results })
    }

    async fn subscribe(&self, feed: &FeedRef) -> Result<FeedSubscription, FeedError> {
        self.subscribed.write().unwrap().push(feed.kind);

        if self.failing_subscribes.contains(&feed.kind) {
            return Err(FeedError::Unauthorized);
        }
        if self.stalled_subscribes.contains(&feed.kind) {
            std::future::pending::<()>().await;
        }

        let (tx, rx) = mpsc::channel(16);
        for update in self.queued.get(&feed.kind).cloned().unwrap_or_default() {
            tx.try_send(Ok(update)).expect("queued updates exceed channel capacity");
        }
        self.senders.write().unwrap().insert(feed.kind, tx);

        Ok(FeedSubscription::new(feed.clone(), rx))
    }
}

// ============================================================================
// Recording display
// ============================================================================

#[derive(Default)]
pub struct RecordingWall {
    tweets: RwLock<Vec<Tweet>>,
}

impl RecordingWall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tweets(&self) -> Vec<Tweet> {
        self.tweets.read().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.tweets
            .read()
            .unwrap()
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tweets.read().unwrap().len()
    }
}

impl Wall for RecordingWall {
    fn append(&self, tweet: &Tweet) {
        self.tweets.write().unwrap().push(tweet.clone());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RwLock<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.write().unwrap().push(notice);
    }
}
