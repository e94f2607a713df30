use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use wayfarer_core::classifier::{classify_payload, classify_probe, PollDecision};
use wayfarer_core::itinerary::Itinerary;
use wayfarer_core::reconcile::reconcile;
use wayfarer_core::types::JobStatus;

use crate::api::TravelApi;
use crate::backoff::{PollConfig, PollingState};

// ─── TrackError ───────────────────────────────────────────────────────────

/// Terminal tracking failure, as shown to the consumer.
///
/// The two variants are deliberately distinct: a `Job` error came from the
/// backend and is final for the job; a `Timeout` only means this session
/// gave up — the job may still be running server-side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("{0}")]
    Job(String),
    #[error(
        "itinerary generation is taking longer than expected; the job may still be \
         running server-side — try again later or restart tracking"
    )]
    Timeout,
}

// ─── TrackerSnapshot ──────────────────────────────────────────────────────

/// Point-in-time view of a tracked job, published over a watch channel.
///
/// Replaced wholesale on every update; the reconciled itinerary is behind
/// an `Arc` and never mutated after publication, so a consumer holding a
/// snapshot can read it without tearing while newer ticks land.
#[derive(Debug, Clone)]
pub struct TrackerSnapshot {
    pub itinerary: Option<Arc<Itinerary>>,
    pub status: Option<JobStatus>,
    pub message: Option<String>,
    /// True until the first fetch of the session (or of a restart) settles.
    pub is_loading: bool,
    /// Set iff polling stopped on a failure; mutually exclusive with
    /// continued polling.
    pub error: Option<TrackError>,
    pub polling_enabled: bool,
}

impl TrackerSnapshot {
    fn initial() -> Self {
        Self {
            itinerary: None,
            status: None,
            message: None,
            is_loading: true,
            error: None,
            polling_enabled: true,
        }
    }
}

// ─── PollingSession ───────────────────────────────────────────────────────

/// Tracks one generation job to completion.
///
/// Owns exactly one polling task and its timer. The task performs an
/// immediate fetch, then sleeps `PollingState::interval` between ticks;
/// ticks are strictly sequential, so a terminal classification ends the
/// loop before any later response could overwrite it. `stop`/`restart`/
/// `Drop` abort the task, which cancels any pending timer — no callback
/// fires after cancellation.
pub struct PollingSession {
    api: Arc<dyn TravelApi>,
    job_id: String,
    config: PollConfig,
    snapshot_tx: watch::Sender<TrackerSnapshot>,
    abort: Mutex<Option<AbortHandle>>,
}

impl PollingSession {
    /// Begin tracking `job_id`: performs one fetch right away, then polls
    /// on a backoff schedule until a terminal state or the retry ceiling.
    pub fn start(api: Arc<dyn TravelApi>, job_id: impl Into<String>, config: PollConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(TrackerSnapshot::initial());
        let session = Self {
            api,
            job_id: job_id.into(),
            config,
            snapshot_tx,
            abort: Mutex::new(None),
        };
        session.spawn_loop();
        session
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Watch receiver for snapshot updates. `wait_for(|s| !s.polling_enabled)`
    /// resolves when tracking ends.
    pub fn subscribe(&self) -> watch::Receiver<TrackerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Stop polling. Safe to call repeatedly and from teardown paths; the
    /// pending timer is cancelled before this returns.
    pub fn stop(&self) {
        if let Some(handle) = self.abort.lock().unwrap().take() {
            handle.abort();
        }
        self.snapshot_tx.send_modify(|s| s.polling_enabled = false);
    }

    /// User-initiated refresh: drop the old loop, clear the error, and
    /// start over from the interval floor.
    pub fn restart(&self) {
        if let Some(handle) = self.abort.lock().unwrap().take() {
            handle.abort();
        }
        info!(job_id = %self.job_id, "restarting tracking");
        self.snapshot_tx.send_modify(|s| {
            s.error = None;
            s.is_loading = true;
            s.polling_enabled = true;
        });
        self.spawn_loop();
    }

    fn spawn_loop(&self) {
        let driver = Driver {
            api: Arc::clone(&self.api),
            job_id: self.job_id.clone(),
            tx: self.snapshot_tx.clone(),
            state: PollingState::new(self.config.clone()),
        };
        let handle = tokio::spawn(driver.run());
        *self.abort.lock().unwrap() = Some(handle.abort_handle());
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        if let Some(handle) = self.abort.lock().unwrap().take() {
            handle.abort();
        }
    }
}

// ─── Driver ───────────────────────────────────────────────────────────────

enum TickOutcome {
    Continue,
    Complete,
    Fatal(String),
}

/// The polling loop proper. Runs on its own task; owns the
/// [`PollingState`] for the session.
struct Driver {
    api: Arc<dyn TravelApi>,
    job_id: String,
    tx: watch::Sender<TrackerSnapshot>,
    state: PollingState,
}

impl Driver {
    async fn run(mut self) {
        info!(job_id = %self.job_id, "tracking started");
        let first = self.full_fetch().await;
        if self.settle(first) {
            return;
        }
        loop {
            tokio::time::sleep(self.state.interval()).await;
            self.state.advance();

            if self.state.is_exhausted() {
                warn!(
                    job_id = %self.job_id,
                    retries = self.state.retry_count(),
                    "retry ceiling exceeded, giving up"
                );
                self.state.disable();
                self.tx.send_modify(|s| {
                    s.error = Some(TrackError::Timeout);
                    s.polling_enabled = false;
                    s.is_loading = false;
                });
                return;
            }

            let outcome = if self.state.is_probe_tick() {
                self.probe_then_fetch().await
            } else {
                self.full_fetch().await
            };
            if self.settle(outcome) {
                return;
            }
        }
    }

    /// Publish a terminal outcome. Returns true when the loop must end.
    fn settle(&mut self, outcome: TickOutcome) -> bool {
        match outcome {
            TickOutcome::Continue => false,
            TickOutcome::Complete => {
                info!(job_id = %self.job_id, "itinerary complete, tracking stopped");
                self.state.disable();
                self.tx.send_modify(|s| s.polling_enabled = false);
                true
            }
            TickOutcome::Fatal(message) => {
                warn!(job_id = %self.job_id, error = %message, "job reported failure");
                self.state.disable();
                self.tx.send_modify(|s| {
                    s.error = Some(TrackError::Job(message));
                    s.polling_enabled = false;
                });
                true
            }
        }
    }

    async fn full_fetch(&mut self) -> TickOutcome {
        match self.api.fetch_itinerary(&self.job_id).await {
            Ok(payload) => {
                let decision = classify_payload(&payload);
                let itinerary = Arc::new(reconcile(&payload));
                self.state.clear_error();
                self.tx.send_modify(|s| {
                    s.status = itinerary.status;
                    s.message = itinerary.message.clone();
                    s.itinerary = Some(Arc::clone(&itinerary));
                    s.is_loading = false;
                });
                match decision {
                    PollDecision::Continue => TickOutcome::Continue,
                    PollDecision::Complete => TickOutcome::Complete,
                    PollDecision::Error(message) => TickOutcome::Fatal(message),
                }
            }
            Err(e) => {
                // Transient: the tick is a no-op and the scheduler retries.
                warn!(job_id = %self.job_id, error = %e, "itinerary fetch failed, will retry");
                self.state.record_error(e.to_string());
                self.tx.send_modify(|s| s.is_loading = false);
                TickOutcome::Continue
            }
        }
    }

    /// Probe tick: ask `/check-status` first and only pay for the full
    /// payload when the job is ready (or never, when it errored).
    async fn probe_then_fetch(&mut self) -> TickOutcome {
        match self.api.check_status(&self.job_id).await {
            Ok(probe) => match classify_probe(&probe) {
                PollDecision::Complete => self.full_fetch().await,
                PollDecision::Error(message) => TickOutcome::Fatal(message),
                PollDecision::Continue => TickOutcome::Continue,
            },
            Err(e) => {
                warn!(job_id = %self.job_id, error = %e, "status probe failed, will retry");
                self.state.record_error(e.to_string());
                TickOutcome::Continue
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
