//! Fixed-period tick scheduling with an injectable clock.

use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// A monotonic time source.
pub trait Clock {
    /// Returns the time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Emits ticks at a fixed period.
///
/// Ticks are not queued: if the caller polls late, all ticks that were due in the meantime
/// collapse into one, and the schedule continues on its initial grid.
pub struct Scheduler<C: Clock> {
    clock: C,
    period: Duration,
    next_tick: Option<Duration>,
}

impl<C: Clock> Scheduler<C> {
    /// Creates a stopped scheduler.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(clock: C, period: Duration) -> Self {
        assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            clock,
            period,
            next_tick: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts the schedule. The first tick is due immediately.
    ///
    /// Has no effect if the scheduler is already running.
    pub fn start(&mut self) {
        if self.next_tick.is_none() {
            self.next_tick = Some(self.clock.now());
        }
    }

    /// Stops the schedule. No ticks are emitted until [`Scheduler::start`] is called again.
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns `true` if a tick is due, and arms the next one.
    pub fn poll_tick(&mut self) -> bool {
        let Some(due) = self.next_tick else {
            return false;
        };
        let now = self.clock.now();
        if now < due {
            return false;
        }

        let late = (now - due).as_nanos();
        let period = self.period.as_nanos();
        let missed = late / period;
        if missed > 0 {
            log::trace!("skipping {missed} missed tick(s)");
        }
        // The first grid point after `now`.
        let into_period = nanos_to_duration(late % period);
        self.next_tick = Some(now.saturating_add(self.period - into_period));
        true
    }

    /// Returns the time until the next tick is due, or [`None`] if the scheduler is stopped.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.next_tick
            .map(|due| due.saturating_sub(self.clock.now()))
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}
