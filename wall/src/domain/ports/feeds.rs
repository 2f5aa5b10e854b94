//! Feed service port
//!
//! Abstracts the third-party feed service: paged history reads and live
//! subscriptions.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::entities::{FeedPage, FeedRef, FeedUpdate};
use crate::error::FeedError;

#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Read the most recent `limit` activities of a feed
    async fn get(&self, feed: &FeedRef, limit: usize) -> Result<FeedPage, FeedError>;

    /// Open a live subscription to a feed
    async fn subscribe(&self, feed: &FeedRef) -> Result<FeedSubscription, FeedError>;
}

/// What the transport task delivers: an update, or the error that ended it
pub type FeedEvent = Result<FeedUpdate, FeedError>;

/// A live feed subscription.
///
/// Updates arrive on a channel fed by the transport task. A transport that
/// stops on its own sends the reason as its last event. Dropping the
/// subscription stops that task.
pub struct FeedSubscription {
    feed: FeedRef,
    updates: mpsc::Receiver<FeedEvent>,
    transport: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    pub fn new(feed: FeedRef, updates: mpsc::Receiver<FeedEvent>) -> Self {
        Self {
            feed,
            updates,
            transport: None,
        }
    }

    /// Attach the task that produces updates
    pub fn with_transport(mut self, transport: JoinHandle<()>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn feed(&self) -> &FeedRef {
        &self.feed
    }

    /// Wait for the next event; `None` once the transport has gone away
    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.updates.recv().await
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        if let Some(transport) = self.transport.take() {
            transport.abort();
        }
    }
}
