//! Domain layer
//!
//! Contains the wall's data model and the traits it needs from the outside.
//! - `entities`: Tweets, feeds and user-facing notices
//! - `ports`: Trait definitions for the post endpoint, feed service and display

pub mod entities;
pub mod ports;
