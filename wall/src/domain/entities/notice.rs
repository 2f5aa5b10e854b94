//! Post submission and user notices

use super::FeedKind;

/// A submitted post form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    text: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_prevented: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stop the form's default navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[cfg(test)]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Something the user is told about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Posted,
    PostFailed,
    FeedFailed(FeedKind),
}

/// Diagnostics captured when a post request fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFailure {
    /// Raw response body, absent when no response was received
    pub response: Option<String>,
    pub status_text: String,
    pub error: String,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    Failed(PostFailure),
}

impl SubmitOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(self, SubmitOutcome::Posted)
    }
}
