//! Deferred fetch: hands a payload to a callback once a delay has elapsed.
//!
//! Scheduling is a single tokio task parked on `sleep_until`. The deadline is
//! fixed when [`Fetcher::fetch`] is called, not when the task is first polled,
//! so the delay is measured from the call site.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::config::FetchConfig;

/// Payload delivered by [`fetch_data`].
pub const DEFAULT_PAYLOAD: &str = "Hello from callback";

/// Delay applied by [`fetch_data`].
pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

/// A boxed callback receiving the fetched payload.
pub type Callback = Box<dyn FnOnce(String) + Send + 'static>;

/// Simulated data source: after `delay`, produces `payload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetcher {
    delay: Duration,
    payload: String,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_PAYLOAD)
    }
}

impl Fetcher {
    pub fn new(delay: Duration, payload: impl Into<String>) -> Self {
        Self {
            delay,
            payload: payload.into(),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.delay, config.payload.clone())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Schedule `callback` to receive the payload after the delay.
    ///
    /// Returns immediately. The callback runs exactly once, on the runtime
    /// the call was made from; awaiting the returned handle is optional.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime with the time driver enabled.
    pub fn fetch<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(String) + Send + 'static,
    {
        let deadline = Instant::now() + self.delay;
        let payload = self.payload.clone();

        debug!(delay_ms = self.delay.as_millis() as u64, "fetch scheduled");

        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            debug!(len = payload.len(), "fetch complete, invoking callback");
            callback(payload);
        })
    }
}

/// Schedule `callback` to receive [`DEFAULT_PAYLOAD`] after [`DEFAULT_DELAY`].
pub fn fetch_data<F>(callback: F) -> JoinHandle<()>
where
    F: FnOnce(String) + Send + 'static,
{
    Fetcher::default().fetch(callback)
}
