//! User-facing notices raised by submissions
//!
//! Submissions complete on worker threads, so notices go through a
//! [`Notifier`] that hands them to whoever displays them (a modal in the
//! GUI, stdout in the CLI).

use std::sync::mpsc::Sender;

use tracing::warn;

pub const SINGLE_SUCCESS_MESSAGE: &str = "Holidays updated successfully";
pub const ALL_SUCCESS_MESSAGE: &str = "Holidays change successfully!";
pub const ALL_FAILURE_MESSAGE: &str = "There was an error adding holidays";
/// Shown when the endpoint reports failure without a message
pub const UNKNOWN_REJECTION_MESSAGE: &str = "The server rejected the holiday changes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices; must be callable from worker threads
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl Notifier for Sender<Notice> {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.send(notice) {
            warn!("[holiday-grid:notice] Dropped notice, receiver gone: {}", e.0.message);
        }
    }
}
