//! Feed module
//!
//! Plain-text rendering of tweets and notices.

pub mod renderer;

pub use renderer::{render_notice, render_tweet};
