use crate::payload::RawPayload;
use crate::types::{JobStatus, StatusProbe};

// ---------------------------------------------------------------------------
// PollDecision
// ---------------------------------------------------------------------------

/// What the polling controller should do after looking at a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollDecision {
    /// Job still running — keep polling.
    Continue,
    /// Job finished — stop polling, the payload is final.
    Complete,
    /// Job failed — stop polling and surface the message.
    Error(String),
}

/// Fallback shown when the backend reports an error without a message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while generating your itinerary";

// ---------------------------------------------------------------------------
// Classification rules
// ---------------------------------------------------------------------------
//
// Pure and deterministic: no I/O, no side effects, identical input gives
// identical output.

/// Classify a full itinerary payload.
///
/// `complete` is terminal even when `days` is absent — an empty complete
/// itinerary is valid data, not an error (the reconciler synthesizes
/// placeholders). `error` surfaces the server message verbatim when
/// present. Any other status, including a missing one, means the job is
/// still running.
pub fn classify_payload(payload: &RawPayload) -> PollDecision {
    match payload.status {
        Some(JobStatus::Complete) => PollDecision::Complete,
        Some(JobStatus::Error) => PollDecision::Error(
            payload
                .message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        ),
        _ => PollDecision::Continue,
    }
}

/// Classify a lightweight status probe.
///
/// An error status wins over `ready`; `ready` (or an explicit `complete`)
/// tells the controller to perform the full fetch.
pub fn classify_probe(probe: &StatusProbe) -> PollDecision {
    match probe.status {
        Some(JobStatus::Error) => PollDecision::Error(
            probe
                .message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        ),
        Some(JobStatus::Complete) => PollDecision::Complete,
        _ if probe.ready => PollDecision::Complete,
        _ => PollDecision::Continue,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
