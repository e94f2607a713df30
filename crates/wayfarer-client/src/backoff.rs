use std::time::Duration;

// ─── PollConfig ───────────────────────────────────────────────────────────

/// Timing bounds for a polling session.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Starting (and minimum) interval between ticks.
    pub floor: Duration,
    /// Interval never grows past this.
    pub ceiling: Duration,
    /// Backoff kicks in once `retry_count` exceeds this many ticks.
    pub backoff_after: u32,
    /// Hard stop: the session gives up once `retry_count` exceeds this.
    pub max_retries: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            floor: Duration::from_secs(5),
            ceiling: Duration::from_secs(60),
            backoff_after: 5,
            max_retries: 20,
        }
    }
}

const BACKOFF_FACTOR: f64 = 1.5;

/// Every fifth tick runs a lightweight status probe instead of a full
/// payload fetch (unless the probe says the job is ready).
const PROBE_CADENCE: u32 = 5;

// ─── PollingState ─────────────────────────────────────────────────────────

/// Retry bookkeeping for one tracked job.
///
/// Owned exclusively by the session's polling loop; the interval is
/// monotonically non-decreasing between resets.
#[derive(Debug, Clone)]
pub struct PollingState {
    config: PollConfig,
    retry_count: u32,
    interval: Duration,
    enabled: bool,
    last_error: Option<String>,
}

impl PollingState {
    pub fn new(config: PollConfig) -> Self {
        let interval = config.floor;
        Self {
            config,
            retry_count: 0,
            interval,
            enabled: true,
            last_error: None,
        }
    }

    /// Account for one scheduled tick: bump the retry count, and grow the
    /// interval once past the backoff threshold.
    pub fn advance(&mut self) {
        self.retry_count += 1;
        if self.retry_count > self.config.backoff_after {
            self.interval = self.interval.mul_f64(BACKOFF_FACTOR).min(self.config.ceiling);
        }
    }

    /// True on the ticks that should probe `/check-status` before (or
    /// instead of) fetching the full payload.
    pub fn is_probe_tick(&self) -> bool {
        self.retry_count % PROBE_CADENCE == PROBE_CADENCE - 1
    }

    /// True once the retry ceiling is exceeded — the session surfaces a
    /// timeout and stops.
    pub fn is_exhausted(&self) -> bool {
        self.retry_count > self.config.max_retries
    }

    /// Back to the floor: used by restart.
    pub fn reset(&mut self) {
        self.retry_count = 0;
        self.interval = self.config.floor;
        self.enabled = true;
        self.last_error = None;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_stays_at_floor_through_the_backoff_threshold() {
        let mut state = PollingState::new(PollConfig::default());
        for _ in 0..5 {
            state.advance();
            assert_eq!(state.interval(), Duration::from_secs(5));
        }
    }

    #[test]
    fn tick_seven_interval_is_floor_times_factor() {
        let mut state = PollingState::new(PollConfig::default());
        for _ in 0..6 {
            state.advance();
        }
        // After 6 ticks with no terminal status, tick 7 is scheduled at
        // 5s * 1.5 = 7.5s.
        assert_eq!(state.interval(), Duration::from_millis(7500));
    }

    #[test]
    fn interval_is_monotonic_and_capped_at_ceiling() {
        let mut state = PollingState::new(PollConfig::default());
        let mut last = state.interval();
        for _ in 0..50 {
            state.advance();
            assert!(state.interval() >= last);
            assert!(state.interval() <= Duration::from_secs(60));
            last = state.interval();
        }
        assert_eq!(state.interval(), Duration::from_secs(60));
    }

    #[test]
    fn exhausted_only_past_the_ceiling() {
        let mut state = PollingState::new(PollConfig::default());
        for _ in 0..20 {
            state.advance();
            assert!(!state.is_exhausted());
        }
        state.advance();
        assert!(state.is_exhausted());
    }

    #[test]
    fn probe_ticks_every_fifth() {
        let mut state = PollingState::new(PollConfig::default());
        let mut probe_ticks = Vec::new();
        for tick in 1..=20 {
            state.advance();
            if state.is_probe_tick() {
                probe_ticks.push(tick);
            }
        }
        assert_eq!(probe_ticks, vec![4, 9, 14, 19]);
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut state = PollingState::new(PollConfig::default());
        for _ in 0..10 {
            state.advance();
        }
        state.record_error("transient".into());
        state.disable();
        assert!(state.interval() > Duration::from_secs(5));

        state.reset();
        assert_eq!(state.retry_count(), 0);
        assert_eq!(state.interval(), Duration::from_secs(5));
        assert!(state.is_enabled());
        assert!(state.last_error().is_none());
    }
}
