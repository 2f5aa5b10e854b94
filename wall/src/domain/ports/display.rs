//! Display ports
//!
//! The wall container and the user notification channel. Markup is up to
//! the implementation.

use crate::domain::entities::{Notice, Tweet};

/// Append-only container tweets are rendered into
pub trait Wall: Send + Sync {
    fn append(&self, tweet: &Tweet);
}

/// Surfaces notices to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
