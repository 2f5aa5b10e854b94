//! Tweet renderer
//!
//! Renders tweets to single terminal lines.

use crate::domain::entities::{Notice, Tweet};

const MAX_TEXT_LEN: usize = 280;

/// Render a tweet as `[time] @author: text`
pub fn render_tweet(tweet: &Tweet) -> String {
    // Keep one tweet per line
    let text = tweet.text.split_whitespace().collect::<Vec<_>>().join(" ");

    format!(
        "[{}] @{}: {}",
        tweet.time.format("%Y-%m-%d %H:%M:%S"),
        tweet.author_name(),
        truncate(&text, MAX_TEXT_LEN)
    )
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Posted => "successfully posted".to_string(),
        Notice::PostFailed => "something went wrong!".to_string(),
        Notice::FeedFailed(kind) => format!("could not load the {} feed", kind),
    }
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
