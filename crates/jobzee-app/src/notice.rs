//! Transient user-facing notifications.
//!
//! Views never propagate failures; they post a [`Notice`] and carry on.
//! Whatever renders the notices drains the [`NoticeBoard`].

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half; cheap to clone into every view.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

/// Receiving half.
#[derive(Debug)]
pub struct NoticeBoard {
    rx: mpsc::UnboundedReceiver<Notice>,
}

/// Create a connected notifier and board.
pub fn channel() -> (Notifier, NoticeBoard) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, NoticeBoard { rx })
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Error, message.into());
    }

    /// Turn a failed action into an error notice.
    pub fn report(&self, err: &AppError, fallback: &str) {
        debug!(error = %err, "Action failed");
        self.error(err.user_message(fallback));
    }

    /// Unwrap `result`, reporting the error and yielding `None` on failure.
    pub fn settle<T>(&self, result: Result<T, AppError>, fallback: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(&err, fallback);
                None
            }
        }
    }

    fn post(&self, level: NoticeLevel, message: String) {
        if self.tx.send(Notice { level, message }).is_err() {
            debug!("Notice board dropped; notice discarded");
        }
    }
}

impl NoticeBoard {
    /// Next notice, waiting if none is queued. `None` once every notifier is gone.
    pub async fn next(&mut self) -> Option<Notice> {
        self.rx.recv().await
    }

    /// All notices queued so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobzee_client::ApiError;

    #[test]
    fn test_notices_arrive_in_order() {
        let (notifier, mut board) = channel();
        notifier.success("Login successful!");
        notifier.error("Login failed!");

        let notices = board.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[1].message, "Login failed!");
        assert!(board.drain().is_empty());
    }

    #[test]
    fn test_settle_reports_backend_message() {
        let (notifier, mut board) = channel();
        let result: Result<(), AppError> = Err(ApiError::from_http_status(
            400,
            r#"{"message":"Job not found"}"#,
        )
        .into());

        assert!(notifier.settle(result, "Failed to load job").is_none());
        assert_eq!(board.drain()[0].message, "Job not found");
    }

    #[test]
    fn test_next_waits_for_a_notice() {
        let (notifier, mut board) = channel();
        let mut next = tokio_test::task::spawn(board.next());

        tokio_test::assert_pending!(next.poll());
        notifier.success("Job posted successfully!");
        assert!(next.is_woken());

        let notice = tokio_test::assert_ready!(next.poll()).unwrap();
        assert_eq!(notice.message, "Job posted successfully!");
    }

    #[test]
    fn test_post_after_board_dropped_is_silent() {
        let (notifier, board) = channel();
        drop(board);
        notifier.error("nobody listening");
    }
}
