//! Web application adapter
//!
//! Talks to the FsTweet web application over HTTP.

mod post_client;

pub use post_client::HttpPostClient;
