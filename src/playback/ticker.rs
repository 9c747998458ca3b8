//! Tick sources driving playback.

use std::time::Duration;
use web_time::Instant;

/// Something that says when the next playback frame is due.
///
/// A source reports at most one tick per call, so a slow caller never sees a
/// backlog of queued ticks.
pub trait TickSource {
    /// Whether a tick is due now. Consumes the tick when it returns `true`.
    fn tick_due(&mut self) -> bool;
}

/// Wall-clock ticker firing once per interval.
///
/// The first poll anchors the clock. When several intervals pass between
/// polls the ticker fires once and re-anchors to the poll time, so missed
/// ticks are coalesced instead of replayed.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTicker {
    /// Create a ticker with the given interval. The clock starts on the first
    /// poll.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restart the clock at `now`; the next tick is one interval later.
    pub fn reset_at(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Poll against an explicit time instead of the system clock.
    pub fn tick_due_at(&mut self, now: Instant) -> bool {
        let due = match self.next_due {
            Some(due) => due,
            None => {
                self.reset_at(now);
                return false;
            }
        };

        if now < due {
            return false;
        }

        let missed = now.duration_since(due).as_nanos() / self.interval.as_nanos().max(1);
        if missed > 0 {
            log::trace!("Coalesced {} missed playback ticks", missed);
        }
        self.reset_at(now);
        true
    }
}

impl TickSource for IntervalTicker {
    fn tick_due(&mut self) -> bool {
        self.tick_due_at(Instant::now())
    }
}

/// Ticker fed by hand, for tests and offline export.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    pending: usize,
}

impl ManualTicker {
    /// Create a ticker with no pending ticks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` ticks.
    pub fn push(&mut self, count: usize) {
        self.pending += count;
    }

    /// Ticks not yet consumed.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl TickSource for ManualTicker {
    fn tick_due(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_first_poll_anchors() {
        let mut ticker = IntervalTicker::new(INTERVAL);
        let t0 = Instant::now();
        assert!(!ticker.tick_due_at(t0));
        assert!(!ticker.tick_due_at(t0 + Duration::from_millis(99)));
        assert!(ticker.tick_due_at(t0 + INTERVAL));
    }

    #[test]
    fn test_missed_ticks_coalesced() {
        let mut ticker = IntervalTicker::new(INTERVAL);
        let t0 = Instant::now();
        ticker.reset_at(t0);

        // Five intervals late: one tick, then nothing until an interval passes
        let late = t0 + Duration::from_millis(500);
        assert!(ticker.tick_due_at(late));
        assert!(!ticker.tick_due_at(late));
        assert!(!ticker.tick_due_at(late + Duration::from_millis(50)));
        assert!(ticker.tick_due_at(late + INTERVAL));
    }

    #[test]
    fn test_manual_ticker() {
        let mut ticker = ManualTicker::new();
        assert!(!ticker.tick_due());
        ticker.push(2);
        assert!(ticker.tick_due());
        assert!(ticker.tick_due());
        assert!(!ticker.tick_due());
    }
}
