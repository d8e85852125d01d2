use std::time::Duration;
use tokio::time::Instant;

/// Stand-in horizon for thresholds too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Tracks time since the last completed user input.
#[derive(Debug, Clone)]
pub struct InactivityWatchdog {
    last_activity: Instant,
    threshold: Duration,
}

impl InactivityWatchdog {
    pub fn new(threshold: Duration) -> Self {
        Self {
            last_activity: Instant::now(),
            threshold,
        }
    }

    /// Record now as the time of last activity.
    pub fn reset(&mut self) {
        self.last_activity = Instant::now();
    }

    /// True once strictly more than the threshold has elapsed since `reset`.
    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.threshold
    }

    /// Point in time at which a blocked input read is abandoned.
    pub fn deadline(&self) -> Instant {
        self.last_activity
            .checked_add(self.threshold)
            .unwrap_or_else(|| self.last_activity + FAR_FUTURE)
    }

    pub fn elapsed(&self) -> Duration {
        self.last_activity.elapsed()
    }
}
