//! Domain ports (traits)
//!
//! Port traits define what the wall needs from the outside world.
//! Adapters provide concrete implementations of these traits.

pub mod display;
pub mod feeds;
pub mod posts;

pub use display::{Notifier, Wall};
pub use feeds::{FeedClient, FeedEvent, FeedSubscription};
pub use posts::PostApi;
