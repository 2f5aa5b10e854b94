//! Ordered append queue
//!
//! Live tweets that arrive while the history batch is still loading are
//! held back and appended right after the batch, in arrival order.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entities::Tweet;
use crate::domain::ports::Wall;

#[derive(Default)]
struct QueueState {
    history_done: bool,
    pending: Vec<Tweet>,
}

pub struct AppendQueue<W: Wall> {
    wall: Arc<W>,
    state: Mutex<QueueState>,
}

impl<W: Wall> AppendQueue<W> {
    pub fn new(wall: Arc<W>) -> Self {
        Self {
            wall,
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Render a live tweet, or buffer it until the history batch is out
    pub async fn push_live(&self, tweet: Tweet) {
        let mut state = self.state.lock().await;
        if state.history_done {
            self.wall.append(&tweet);
        } else {
            tracing::debug!(tweet_id = %tweet.id, "Buffering live tweet until history is rendered");
            state.pending.push(tweet);
        }
    }

    /// Render the history batch followed by any buffered live tweets.
    ///
    /// Afterwards live tweets go straight to the wall.
    pub async fn finish_history(&self, batch: Vec<Tweet>) {
        let mut state = self.state.lock().await;
        for tweet in &batch {
            self.wall.append(tweet);
        }

        let pending = std::mem::take(&mut state.pending);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "Flushing buffered live tweets");
        }
        for tweet in &pending {
            self.wall.append(tweet);
        }

        state.history_done = true;
    }

    #[cfg(test)]
    pub async fn is_live(&self) -> bool {
        self.state.lock().await.history_done
    }
}
