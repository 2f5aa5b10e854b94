//! Terminal display
//!
//! The wall is stdout, one tweet per line. Notices go to stderr so the wall
//! output stays clean when piped.

use std::io::Write;

use crate::domain::entities::{Notice, Tweet};
use crate::domain::ports::{Notifier, Wall};
use crate::feed::{render_notice, render_tweet};

#[derive(Default)]
pub struct TerminalWall;

impl TerminalWall {
    pub fn new() -> Self {
        Self
    }
}

impl Wall for TerminalWall {
    fn append(&self, tweet: &Tweet) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", render_tweet(tweet)) {
            tracing::warn!(error = %e, "Failed to write to the wall");
        }
    }
}

#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let mut err = std::io::stderr().lock();
        if let Err(e) = writeln!(err, "! {}", render_notice(&notice)) {
            tracing::warn!(error = %e, "Failed to show notice");
        }
    }
}
