//! Engine: polls the status API, reconciles against what was already sent,
//! and dispatches notifications

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::api::StatusSource;
use crate::error::WatchError;
use crate::notifier::{send_message, Notifier};
use crate::response::{check_response, parse_status, read_cursor};
use crate::scheduler::Scheduler;
use crate::state::WatchState;

/// Prefix of every failure message sent to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a single polling iteration did about notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A status or failure message was handed to the notifier
    Notified(String),
    /// The message repeated the last one sent and was suppressed
    Duplicate(String),
    /// The response listed no homeworks
    NoNewStatus,
    /// A failure that is logged but never sent
    Logged(String),
}

/// The engine owns the polling state and runs the reconcile loop
pub struct Engine {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    state: WatchState,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
        state: WatchState,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            scheduler,
            state,
            cancel,
        }
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run one fetch/validate/notify pass without the trailing pause.
    ///
    /// Only the first homework is inspected; the API lists the most recent
    /// submission first.
    pub async fn poll_once(&mut self) -> Outcome {
        let response = match self.source.fetch(self.state.cursor).await {
            Ok(response) => response,
            Err(e) => return self.handle_error(e).await,
        };

        let homeworks = match check_response(&response) {
            Ok(homeworks) => homeworks,
            Err(e) => return self.handle_error(e).await,
        };

        let outcome = match homeworks.first() {
            None => {
                tracing::debug!("No new homework statuses in response");
                Outcome::NoNewStatus
            }
            Some(latest) => match parse_status(latest) {
                Ok(message) => self.deliver(message).await,
                Err(e) => self.handle_error(e).await,
            },
        };

        // Read after the homework so a bad current_date never hides a status
        match read_cursor(&response) {
            Ok(cursor) => self.state.advance_cursor(cursor),
            Err(e) => {
                self.handle_error(e).await;
            }
        }

        outcome
    }

    /// Poll forever, pausing after every iteration, until cancelled.
    ///
    /// Returns the final state.
    pub async fn run(mut self) -> WatchState {
        tracing::info!("Polling homework statuses from {}", self.state.cursor);
        let cancel = self.cancel.clone();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.poll_once() => {
                    tracing::debug!("Poll finished: {:?}", outcome);
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.scheduler.tick() => {}
            }
        }

        tracing::debug!("Polling loop cancelled");
        self.state
    }

    async fn deliver(&mut self, message: String) -> Outcome {
        if !self.state.is_new(&message) {
            tracing::debug!("Suppressing repeated message: {}", message);
            return Outcome::Duplicate(message);
        }

        if !send_message(self.notifier.as_ref(), &message).await {
            tracing::debug!("Recording undelivered message as sent to avoid resending it");
        }
        self.state.record(&message);
        Outcome::Notified(message)
    }

    async fn handle_error(&mut self, error: WatchError) -> Outcome {
        if !error.is_notifiable() {
            tracing::error!("{}", error);
            return Outcome::Logged(error.to_string());
        }

        let message = format!("{}: {}", FAILURE_PREFIX, error);
        tracing::error!("{}", message);
        self.deliver(message).await
    }
}

/// Current time as epoch seconds, the initial cursor
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
