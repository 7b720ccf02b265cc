//! Fixed-interval poll loop over the status store.
//!
//! The [`Poller`] owns the in-memory snapshot. Each tick reads the store,
//! merges what it found, and renders. A failed read never changes the
//! snapshot and never changes the cadence.

use std::time::{Duration, Instant};

use tokenhud_core::{DisplayState, PollStatus, Renderer, SnapshotPatch, UsageSnapshot};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::status_store::StatusStore;

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Settings for a [`Poller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Mark the display stale after this long without a successful load.
    pub stale_after: Option<Duration>,
    /// Stop after this many ticks. `None` runs until the process exits.
    pub max_ticks: Option<u64>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            stale_after: None,
            max_ticks: None,
        }
    }
}

/// What a single tick did to the in-memory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The store was read and merged.
    Updated,
    /// The read failed; the previous snapshot was kept.
    Held,
}

/// Reader side of the status store.
#[derive(Debug)]
pub struct Poller {
    store: StatusStore,
    config: PollerConfig,
    current: UsageSnapshot,
    status: PollStatus,
    started_at: Instant,
    last_success: Option<Instant>,
}

impl Poller {
    /// Creates a poller that starts from the boot snapshot.
    pub fn new(store: StatusStore, config: PollerConfig) -> Self {
        Self {
            store,
            config,
            current: UsageSnapshot::initial(),
            status: PollStatus::default(),
            started_at: Instant::now(),
            last_success: None,
        }
    }

    /// Replaces the starting snapshot.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: UsageSnapshot) -> Self {
        self.current = snapshot;
        self
    }

    /// The snapshot currently shown.
    pub fn snapshot(&self) -> &UsageSnapshot {
        &self.current
    }

    /// Poll loop health.
    pub fn status(&self) -> &PollStatus {
        &self.status
    }

    /// The store being polled.
    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    /// Display state for the current snapshot.
    pub fn display(&self) -> DisplayState {
        DisplayState::from_snapshot(&self.current)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Applies one load result to the in-memory state.
    ///
    /// This is the whole tick minus I/O, so tests can feed synthetic results.
    pub fn observe(&mut self, result: Result<SnapshotPatch, StoreError>) -> TickOutcome {
        self.observe_at(result, Instant::now())
    }

    fn observe_at(&mut self, result: Result<SnapshotPatch, StoreError>, now: Instant) -> TickOutcome {
        self.status.ticks += 1;

        let outcome = match result {
            Ok(patch) => {
                if self.status.consecutive_failures > 0 {
                    info!(
                        failures = self.status.consecutive_failures,
                        "Status store readable again"
                    );
                }
                self.current.apply(&patch);
                self.status.consecutive_failures = 0;
                self.status.last_error = None;
                self.last_success = Some(now);
                TickOutcome::Updated
            }
            Err(e) => {
                self.status.consecutive_failures = self.status.consecutive_failures.saturating_add(1);
                if self.status.consecutive_failures == 1 {
                    warn!(error = %e, "Status store read failed, holding last snapshot");
                } else {
                    debug!(
                        error = %e,
                        failures = self.status.consecutive_failures,
                        "Status store still unreadable"
                    );
                }
                self.status.last_error = Some(e.to_string());
                TickOutcome::Held
            }
        };

        self.status.stale = self.is_stale_at(now);
        outcome
    }

    fn is_stale_at(&self, now: Instant) -> bool {
        let Some(threshold) = self.config.stale_after else {
            return false;
        };
        let since = self.last_success.unwrap_or(self.started_at);
        now.saturating_duration_since(since) > threshold
    }

    /// Reads the store once and applies the result.
    pub async fn tick(&mut self) -> TickOutcome {
        let result = self.store.load().await;
        self.observe(result)
    }

    /// Draws the current snapshot. Surface errors are logged, not returned.
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        if let Err(e) = renderer.render(&self.display(), &self.status) {
            warn!(error = %e, "Render failed");
        }
    }

    // ========================================================================
    // Loop
    // ========================================================================

    /// Ticks and renders on a fixed interval.
    ///
    /// Runs until `max_ticks` is reached, or forever when it is unset; callers
    /// stop it by dropping the future. Returns the number of ticks run.
    pub async fn run<R: Renderer>(&mut self, mut renderer: R) -> u64 {
        info!(
            path = %self.store.path().display(),
            interval = ?self.config.interval,
            "Starting poll loop"
        );

        // tokio panics on a zero period
        let mut ticker = interval(self.config.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ran = 0_u64;
        loop {
            ticker.tick().await;

            self.tick().await;
            self.render(&mut renderer);
            ran += 1;

            if self.config.max_ticks.is_some_and(|max| ran >= max) {
                debug!(ticks = ran, "Poll loop reached tick limit");
                return ran;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing() -> StoreError {
        StoreError::StoreUnavailable {
            path: PathBuf::from("/nonexistent/token_status.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    fn poller(stale_after: Option<Duration>) -> Poller {
        Poller::new(
            StatusStore::new("/nonexistent/token_status.json"),
            PollerConfig {
                stale_after,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_boot_snapshot() {
        let poller = poller(None);
        assert_eq!(poller.snapshot(), &UsageSnapshot::initial());
        assert_eq!(poller.display().headline_text, "200,000");
    }

    #[test]
    fn test_seeded_snapshot_is_held_on_failure() {
        let seed = UsageSnapshot::compute(190_000, 200_000);
        let mut poller = poller(None).with_snapshot(seed.clone());
        poller.observe(Err(missing()));
        assert_eq!(poller.snapshot(), &seed);
        assert_eq!(poller.store().path(), std::path::Path::new("/nonexistent/token_status.json"));
    }

    #[test]
    fn test_failure_holds_and_counts() {
        let mut poller = poller(None);
        poller.observe(Ok(SnapshotPatch::from(&UsageSnapshot::compute(50_000, 200_000))));

        assert_eq!(poller.observe(Err(missing())), TickOutcome::Held);
        assert_eq!(poller.observe(Err(missing())), TickOutcome::Held);

        assert_eq!(poller.snapshot(), &UsageSnapshot::compute(50_000, 200_000));
        assert_eq!(poller.status().consecutive_failures, 2);
        assert_eq!(poller.status().ticks, 3);
        assert!(poller.status().last_error.is_some());
    }

    #[test]
    fn test_success_resets_failures() {
        let mut poller = poller(None);
        poller.observe(Err(missing()));
        let outcome = poller.observe(Ok(SnapshotPatch {
            used: Some(10),
            ..Default::default()
        }));

        assert_eq!(outcome, TickOutcome::Updated);
        assert!(poller.status().is_healthy());
        assert!(poller.status().last_error.is_none());
        assert_eq!(poller.snapshot().used, 10);
    }

    #[test]
    fn test_never_stale_without_threshold() {
        let mut poller = poller(None);
        let later = Instant::now() + Duration::from_secs(3600);
        poller.observe_at(Err(missing()), later);
        assert!(!poller.status().stale);
    }

    #[test]
    fn test_stale_after_threshold() {
        let mut poller = poller(Some(Duration::from_secs(30)));
        let t0 = Instant::now();

        poller.observe_at(Ok(SnapshotPatch::default()), t0);
        assert!(!poller.status().stale);

        poller.observe_at(Err(missing()), t0 + Duration::from_secs(10));
        assert!(!poller.status().stale);

        poller.observe_at(Err(missing()), t0 + Duration::from_secs(31));
        assert!(poller.status().stale);

        poller.observe_at(Ok(SnapshotPatch::default()), t0 + Duration::from_secs(32));
        assert!(!poller.status().stale);
    }

    #[test]
    fn test_stale_counts_from_start_when_never_loaded() {
        let mut poller = poller(Some(Duration::from_secs(5)));
        let later = poller.started_at + Duration::from_secs(6);
        poller.observe_at(Err(missing()), later);
        assert!(poller.status().stale);
    }
}
