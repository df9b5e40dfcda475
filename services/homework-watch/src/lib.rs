//! Homework Watch - homework review status notifier
//!
//! Polls the Practicum homework status API, detects review status changes of
//! the latest submission, and sends a Telegram message for each change.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod response;
pub mod scheduler;
pub mod state;
pub mod telegram;

pub use config::{load_config, Config, Credentials};
pub use engine::{Engine, Outcome};
pub use error::{Result, WatchError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::PracticumClient;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::scheduler::{FixedInterval, Scheduler};
use crate::state::WatchState;
use crate::telegram::TelegramNotifier;

/// Builder for the polling engine.
///
/// Refuses to build unless every required credential is present, so a
/// misconfigured process never reaches its first fetch.
pub struct WatcherBuilder {
    config: Config,
    credentials: Credentials,
    http: Option<Arc<dyn HttpClient>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    initial_cursor: Option<i64>,
}

impl WatcherBuilder {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            http: None,
            scheduler: None,
            initial_cursor: None,
        }
    }

    /// Use the given HTTP client instead of a reqwest one
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Pause between polls with `scheduler` instead of the configured fixed period
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Start polling from `cursor` instead of the current time
    pub fn with_initial_cursor(mut self, cursor: i64) -> Self {
        self.initial_cursor = Some(cursor);
        self
    }

    pub fn build(self) -> Result<Watcher> {
        if let Err(e) = self.credentials.require_all() {
            tracing::error!("CRITICAL: {}", e);
            return Err(e);
        }
        self.config.validate()?;

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                self.config.api.timeout_seconds,
            ))?),
        };

        let source = Arc::new(PracticumClient::new(
            &self.config.api.endpoint,
            self.credentials.practicum_token(),
            Arc::clone(&http),
        ));
        let notifier = Arc::new(TelegramNotifier::new(
            &self.config.telegram.api_url,
            self.credentials.telegram_token(),
            self.credentials.telegram_chat_id(),
            http,
        ));
        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(FixedInterval::new(Duration::from_secs(
                self.config.polling.retry_period_seconds,
            ))),
        };
        let cursor = self
            .initial_cursor
            .unwrap_or_else(engine::current_epoch_secs);

        tracing::debug!(
            "Endpoint: {}, retry period: {}s, initial cursor: {}",
            self.config.api.endpoint,
            self.config.polling.retry_period_seconds,
            cursor
        );

        let engine = Engine::new(
            source,
            notifier,
            scheduler,
            WatchState::new(cursor),
            CancellationToken::new(),
        );
        Ok(Watcher { engine })
    }
}

/// A configured watcher ready to start polling
pub struct Watcher {
    engine: Engine,
}

impl Watcher {
    pub fn cancellation_token(&self) -> CancellationToken {
        self.engine.cancellation_token()
    }

    /// Take the engine to drive it directly instead of via [`Watcher::start`]
    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Poll until Ctrl-C or until the cancellation token is triggered
    pub async fn start(self) -> Result<()> {
        let cancel_for_signal = self.engine.cancellation_token();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    cancel_for_signal.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
            }
        });

        tracing::info!("Homework watcher started");
        let state = self.engine.run().await;
        tracing::info!("Homework watcher stopped at cursor {}", state.cursor);

        Ok(())
    }
}
