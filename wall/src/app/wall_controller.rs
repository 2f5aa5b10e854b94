//! Wall controller
//!
//! Posts new tweets, keeps the user and timeline feeds subscribed and renders
//! the initial history window. Everything reaches the wall through a single
//! `AppendQueue`, so live tweets never interleave with the history batch.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::WallConfig;
use crate::domain::entities::{
    FeedKind, HistoryOrder, NewTweet, Notice, SubmitEvent, SubmitOutcome, Tweet,
};
use crate::domain::ports::{FeedClient, FeedSubscription, Notifier, PostApi, Wall};
use crate::error::{FeedError, HistoryError};

use super::AppendQueue;

/// Feeds subscribed on start, in the order they are opened
const LIVE_FEEDS: [FeedKind; 2] = [FeedKind::User, FeedKind::Timeline];

pub struct WallController<P, F, W, N>
where
    P: PostApi,
    F: FeedClient,
    W: Wall,
    N: Notifier,
{
    config: WallConfig,
    posts: Arc<P>,
    feeds: Arc<F>,
    queue: Arc<AppendQueue<W>>,
    notifier: Arc<N>,
}

impl<P, F, W, N> WallController<P, F, W, N>
where
    P: PostApi,
    F: FeedClient + 'static,
    W: Wall + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        config: WallConfig,
        posts: Arc<P>,
        feeds: Arc<F>,
        wall: Arc<W>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            config,
            posts,
            feeds,
            queue: Arc::new(AppendQueue::new(wall)),
            notifier,
        }
    }

    /// Handle a submitted post form.
    ///
    /// Always prevents the default navigation. Makes one request; the user is
    /// notified exactly once either way.
    pub async fn submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let tweet = NewTweet::new(event.text());
        match self.posts.create_tweet(&tweet).await {
            Ok(()) => {
                tracing::info!("Tweet posted");
                self.notifier.notify(Notice::Posted);
                SubmitOutcome::Posted
            }
            Err(e) => {
                let failure = e.diagnostics();
                tracing::error!(
                    response = ?failure.response,
                    status_text = %failure.status_text,
                    error = %failure.error,
                    "Failed to post tweet"
                );
                self.notifier.notify(Notice::PostFailed);
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Open the live feeds and render the history window.
    ///
    /// The feeds are opened in background tasks, so a slow feed service
    /// never holds back the history. Feed failures are logged and reported
    /// to the user; whatever did work keeps running.
    pub async fn start(&self) -> WallSession {
        let mut pumps = Vec::new();

        if self.config.realtime {
            for kind in LIVE_FEEDS {
                pumps.push(self.spawn_live_feed(kind));
            }
        }

        self.load_history().await;

        WallSession { pumps }
    }

    /// Fetch the history window and render it, then release buffered live tweets
    pub async fn load_history(&self) {
        let batch = match self.fetch_history().await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, "History load failed");
                self.notifier.notify(Notice::FeedFailed(e.kind));
                Vec::new()
            }
        };

        tracing::info!(count = batch.len(), "Rendering feed history");
        self.queue.finish_history(batch).await;
    }

    /// Read the timeline page, then the user page, and merge them for display
    pub async fn fetch_history(&self) -> Result<Vec<Tweet>, HistoryError> {
        let limit = self.config.history_limit;

        let timeline = self.read_page(FeedKind::Timeline, limit).await?;
        let user = self.read_page(FeedKind::User, limit).await?;

        Ok(merge_history(timeline, user, self.config.history_order))
    }

    async fn read_page(&self, kind: FeedKind, limit: usize) -> Result<Vec<Tweet>, HistoryError> {
        let feed = self.config.user.feed(kind);
        let page = self
            .feeds
            .get(&feed, limit)
            .await
            .map_err(|source| HistoryError { kind, source })?;

        tracing::debug!(feed = %feed.feed_id(), count = page.results.len(), "Read feed page");
        Ok(page.results)
    }

    /// Subscribe to one feed and render its updates until it ends
    fn spawn_live_feed(&self, kind: FeedKind) -> JoinHandle<()> {
        let feed = self.config.user.feed(kind);
        let feeds = Arc::clone(&self.feeds);
        let queue = Arc::clone(&self.queue);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            let subscription = match feeds.subscribe(&feed).await {
                Ok(subscription) => subscription,
                Err(e) => {
                    tracing::warn!(feed = %feed.feed_id(), error = %e, "Failed to subscribe to feed");
                    notifier.notify(Notice::FeedFailed(kind));
                    return;
                }
            };
            tracing::info!(feed = %feed.feed_id(), "Subscribed to feed");

            let reason = pump(subscription, &queue).await;
            tracing::warn!(feed = %feed.feed_id(), error = %reason, "Live feed ended");
            notifier.notify(Notice::FeedFailed(kind));
        })
    }
}

/// Render live updates until the subscription ends, returning why it did.
///
/// Closing the session aborts this instead, so that is never reported.
async fn pump<W: Wall>(mut subscription: FeedSubscription, queue: &AppendQueue<W>) -> FeedError {
    let feed_id = subscription.feed().feed_id();
    loop {
        let update = match subscription.next().await {
            Some(Ok(update)) => update,
            Some(Err(reason)) => return reason,
            None => return FeedError::Closed,
        };

        if !update.deleted.is_empty() {
            tracing::debug!(feed = %feed_id, count = update.deleted.len(), "Ignoring deleted activities");
        }
        // Only the first new tweet of a notification is shown
        match update.into_newest() {
            Some(tweet) => queue.push_live(tweet).await,
            None => tracing::debug!(feed = %feed_id, "Update without new tweets"),
        }
    }
}

/// Merge the timeline and user pages into display order.
///
/// The pages are concatenated and sorted newest first; `OldestFirst` then
/// reverses the list. The sort is stable.
pub fn merge_history(timeline: Vec<Tweet>, user: Vec<Tweet>, order: HistoryOrder) -> Vec<Tweet> {
    let mut all = timeline;
    all.extend(user);
    all.sort_by(|a, b| b.time.cmp(&a.time));

    if order == HistoryOrder::OldestFirst {
        all.reverse();
    }
    all
}

/// Live subscriptions of a started wall.
///
/// Closing or dropping the session stops them.
pub struct WallSession {
    pumps: Vec<JoinHandle<()>>,
}

impl WallSession {
    /// Number of feeds still opening or delivering
    pub fn live_feeds(&self) -> usize {
        self.pumps.iter().filter(|p| !p.is_finished()).count()
    }

    pub fn close(self) {
        tracing::info!(feeds = self.pumps.len(), "Closing wall session");
    }
}

impl Drop for WallSession {
    fn drop(&mut self) {
        for pump in &self.pumps {
            pump.abort();
        }
    }
}
