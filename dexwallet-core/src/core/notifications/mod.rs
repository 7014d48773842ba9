//! User-facing notifications
//!
//! Only user-initiated actions (copy to clipboard, a failed approval) reach
//! the sink. Background read failures are logged instead.

/// Notification sink provided by the host UI
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Sink that writes to the log; used until the host installs its own
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn success(&self, message: &str) {
        log::info!("[notify] {}", message);
    }

    fn error(&self, message: &str) {
        log::error!("[notify] {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_does_not_panic() {
        let sink = LogNotificationSink;
        sink.success("Address copied");
        sink.error("Approval failed");
    }
}
