//! Feed service adapter
//!
//! Client for a Stream-style activity feed service.

mod client;
mod realtime;

pub use client::{StreamFeedClient, DEFAULT_API_URL, DEFAULT_FAYE_URL, DEFAULT_SETUP_TIMEOUT};
