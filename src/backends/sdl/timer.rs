//! The repeating timer driving the fades, as a deadline checked by the
//! event loop.

use std::time::{Duration, Instant};

/// Fires every `period` once armed.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Ticker {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Start ticking one period after `now`. Arming a running timer does
    /// nothing.
    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.period);
        }
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// How long the event loop may sleep: until the next tick, or `idle`
    /// when stopped.
    #[must_use]
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next {
            Some(next) => next.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }

    /// Whether a tick is due at `now`. At most one tick is reported per
    /// call; a late timer does not try to catch up.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if next <= now => {
                let following = next + self.period;
                self.next = Some(if following <= now {
                    now + self.period
                } else {
                    following
                });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(20);
    const IDLE: Duration = Duration::from_millis(100);

    #[test]
    fn test_stopped() {
        let now = Instant::now();
        let mut t = Ticker::new(PERIOD);
        assert!(!t.is_armed());
        assert!(!t.fire(now + IDLE));
        assert_eq!(t.timeout(now, IDLE), IDLE);
    }

    #[test]
    fn test_fires_every_period() {
        let start = Instant::now();
        let mut t = Ticker::new(PERIOD);
        t.arm(start);
        assert_eq!(t.timeout(start, IDLE), PERIOD);
        assert!(!t.fire(start + Duration::from_millis(19)));
        assert!(t.fire(start + PERIOD));
        assert!(!t.fire(start + PERIOD));
        assert!(t.fire(start + PERIOD * 2));

        // Arming again keeps the schedule.
        t.arm(start + PERIOD * 2 + Duration::from_millis(5));
        assert_eq!(t.timeout(start + PERIOD * 2, IDLE), PERIOD);

        t.stop();
        assert!(!t.fire(start + PERIOD * 3));
    }

    #[test]
    fn test_late_does_not_catch_up() {
        let start = Instant::now();
        let mut t = Ticker::new(PERIOD);
        t.arm(start);
        let late = start + PERIOD * 10;
        assert!(t.fire(late));
        assert!(!t.fire(late));
        assert_eq!(t.timeout(late, IDLE), PERIOD);
    }
}
