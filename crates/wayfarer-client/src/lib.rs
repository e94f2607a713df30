//! `wayfarer-client` — tracking driver for long-running itinerary jobs.
//!
//! A generation job takes minutes and fills its payload in incrementally;
//! this crate owns the client side of that wait: a bounded, backoff-driven
//! polling loop that classifies every response, reconciles partial payloads
//! into a stable view model, and publishes snapshots to consumers.
//!
//! # Architecture
//!
//! ```text
//! PollingSession::start(api, job_id)
//!     │ owns one task + one timer
//!     ▼
//! Driver loop    ← fetch / probe per tick, PollingState backoff
//!     │ classify_payload / classify_probe   (wayfarer-core)
//!     │ reconcile                            (wayfarer-core)
//!     ▼
//! watch::Sender<TrackerSnapshot>  → consumers (CLI, UI adapters)
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use wayfarer_client::{HttpTravelApi, PollConfig, PollingSession};
//!
//! let api = Arc::new(HttpTravelApi::new("http://localhost:8000/api", Duration::from_secs(30))?);
//! let session = PollingSession::start(api, "job-123", PollConfig::default());
//! let mut rx = session.subscribe();
//! let done = rx.wait_for(|s| !s.polling_enabled).await?;
//! match (&done.error, &done.itinerary) {
//!     (None, Some(itinerary)) => println!("{} days planned", itinerary.days.len()),
//!     (Some(err), _) => eprintln!("tracking failed: {err}"),
//!     _ => {}
//! }
//! ```

pub mod api;
pub mod backoff;
pub mod error;
pub mod session;

pub use api::{HttpTravelApi, TravelApi};
pub use backoff::{PollConfig, PollingState};
pub use error::{ClientError, Result};
pub use session::{PollingSession, TrackError, TrackerSnapshot};
