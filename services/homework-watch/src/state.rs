//! Polling cursor and de-duplication state owned by the engine

/// State carried from one polling iteration to the next.
///
/// Lives for the process lifetime and is never persisted, so a restart may
/// repeat the last notification once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchState {
    /// Lower bound (epoch seconds) passed as `from_date` on the next fetch
    pub cursor: i64,
    /// Last message handed to the notifier, status or error alike
    pub last_notified: Option<String>,
}

impl WatchState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_notified: None,
        }
    }

    /// Whether `message` differs from the last one sent
    pub fn is_new(&self, message: &str) -> bool {
        self.last_notified.as_deref() != Some(message)
    }

    /// Record `message` as the last one sent
    pub fn record(&mut self, message: &str) {
        self.last_notified = Some(message.to_string());
    }

    pub fn advance_cursor(&mut self, cursor: i64) {
        if cursor != self.cursor {
            tracing::debug!("Advancing cursor {} -> {}", self.cursor, cursor);
        }
        self.cursor = cursor;
    }
}
