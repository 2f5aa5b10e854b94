//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod stream;
pub mod terminal;

pub use http::HttpPostClient;
pub use stream::StreamFeedClient;
pub use terminal::{TerminalNotifier, TerminalWall};
