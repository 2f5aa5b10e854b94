//! Domain entities
//!
//! Plain data the wall works with. Wire formats of the feed service map
//! straight onto these through serde.

pub mod feed;
pub mod notice;
pub mod tweet;

pub use feed::{FeedKind, FeedPage, FeedRef, FeedUpdate, HistoryOrder};
pub use notice::{Notice, PostFailure, SubmitEvent, SubmitOutcome};
pub use tweet::{parse_feed_time, NewTweet, Tweet, TweetId};
