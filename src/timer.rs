use std::time::Duration;

/// Milliseconds on the game clock.
pub type Millis = u64;

/// One-shot countdown handle.
///
/// A countdown fires at most once per `start`. Restarting or cancelling it
/// discards the old deadline, so an earlier schedule can never fire after a
/// newer one has been armed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    deadline: Option<Millis>,
}

impl Countdown {
    pub fn idle() -> Self {
        Countdown { deadline: None }
    }

    /// Arms the countdown, replacing any pending deadline.
    pub fn start(&mut self, now: Millis, duration: Duration) {
        self.deadline = Some(now + duration.as_millis() as Millis);
    }

    /// Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    pub fn remaining(&self, now: Millis) -> Option<Duration> {
        self.deadline
            .map(|d| Duration::from_millis(d.saturating_sub(now)))
    }

    /// Fires once the clock reaches the deadline, disarming the countdown.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period tick schedule. Stopped clocks never report a due tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    interval: Millis,
    next_at: Option<Millis>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        TickClock {
            interval: (interval.as_millis() as Millis).max(1),
            next_at: None,
        }
    }

    /// (Re)starts the schedule with its first tick one interval after `now`.
    pub fn restart(&mut self, now: Millis, interval: Duration) {
        self.interval = (interval.as_millis() as Millis).max(1);
        self.next_at = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_at = None;
    }

    pub fn next_at(&self) -> Option<Millis> {
        self.next_at
    }

    /// Consumes the next tick if it is due at or before `now`, returning the
    /// instant it was scheduled for.
    pub fn take_due(&mut self, now: Millis) -> Option<Millis> {
        let at = self.next_at.filter(|&at| at <= now)?;
        self.next_at = Some(at + self.interval);
        Some(at)
    }

    /// Drops every tick due at or before `now` without running it. The next
    /// tick stays on the original cadence. Returns how many were dropped.
    pub fn skip_missed(&mut self, now: Millis) -> u64 {
        match self.next_at {
            Some(at) if at <= now => {
                let missed = (now - at) / self.interval + 1;
                self.next_at = Some(at + missed * self.interval);
                missed
            }
            _ => 0,
        }
    }
}
