use std::time::{Duration, Instant};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Repeating refresh timer, polled cooperatively from the daemon loop.
/// Owned explicitly by whoever activates the widget: armed with `start`,
/// cancelled with `stop` on teardown so no recurring tick outlives its owner.
#[derive(Debug)]
pub struct RefreshScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the period; an active scheduler re-arms from now.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
        if self.is_active() {
            self.start(Instant::now());
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when a tick is due. Re-arms at `now + period`, so ticks missed
    /// while the loop was suspended are skipped, never replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(60);

    #[test]
    fn inactive_until_started() {
        let mut s = RefreshScheduler::new(PERIOD);
        assert!(!s.is_active());
        assert!(!s.poll(Instant::now()));
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut s = RefreshScheduler::new(PERIOD);
        s.start(t0);
        assert!(!s.poll(t0));
        assert!(!s.poll(t0 + Duration::from_secs(59)));
        assert!(s.poll(t0 + PERIOD));
        // Immediately after firing, re-armed a full period out.
        assert!(!s.poll(t0 + PERIOD + Duration::from_secs(1)));
    }

    #[test]
    fn missed_ticks_are_skipped_not_replayed() {
        let t0 = Instant::now();
        let mut s = RefreshScheduler::new(PERIOD);
        s.start(t0);
        // Suspended across three periods: exactly one tick fires.
        let late = t0 + PERIOD * 3 + Duration::from_secs(5);
        assert!(s.poll(late));
        assert!(!s.poll(late + Duration::from_secs(1)));
        assert!(s.poll(late + PERIOD));
    }

    #[test]
    fn stop_cancels() {
        let t0 = Instant::now();
        let mut s = RefreshScheduler::new(PERIOD);
        s.start(t0);
        s.stop();
        assert!(!s.is_active());
        assert!(!s.poll(t0 + PERIOD * 10));
    }

    #[test]
    fn set_period_while_stopped_stays_inactive() {
        let mut s = RefreshScheduler::new(PERIOD);
        s.set_period(Duration::from_secs(5));
        assert_eq!(s.period(), Duration::from_secs(5));
        assert!(!s.is_active());
    }

    #[test]
    fn restart_rearms() {
        let t0 = Instant::now();
        let mut s = RefreshScheduler::new(PERIOD);
        s.start(t0);
        s.stop();
        s.start(t0 + PERIOD);
        assert!(!s.poll(t0 + PERIOD));
        assert!(s.poll(t0 + PERIOD * 2));
    }
}
