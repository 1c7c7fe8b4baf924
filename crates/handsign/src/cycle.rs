//! The detection cycle: periodically acquires hands, classifies them and presents the result.
//!
//! At most one acquisition is in flight at any time. A tick that fires while the previous
//! acquisition is still pending is dropped instead of queued, so a slow landmark source never
//! causes a backlog of stale frames.

use std::{thread, time::Duration};

use pawawwewism::PromiseHandle;

use crate::estimator::{Estimator, GestureMatch, DEFAULT_MIN_CONFIDENCE};
use crate::schedule::{Clock, Scheduler};
use crate::timer::FpsCounter;

/// Landmarks of a single detected hand, as delivered by a [`LandmarkSource`].
///
/// Not validated: a well-formed hand has 21 points in [`LandmarkIdx`] order.
///
/// [`LandmarkIdx`]: crate::landmark::LandmarkIdx
pub type RawHand = Vec<[f32; 3]>;

/// Upper bound on how long [`DetectionCycle::run`] sleeps before checking on an acquisition.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Asynchronously detects hands in the newest camera frame.
pub trait LandmarkSource {
    /// Starts detecting hands in the newest frame.
    ///
    /// Returns [`None`] if the source is not ready to deliver frames. The returned handle resolves
    /// to all hands found in the frame, which may be none. Dropping the connected promise without
    /// fulfilling it counts as finding no hands.
    fn acquire(&mut self) -> Option<PromiseHandle<Vec<RawHand>>>;
}

impl<F: FnMut() -> Option<PromiseHandle<Vec<RawHand>>>> LandmarkSource for F {
    fn acquire(&mut self) -> Option<PromiseHandle<Vec<RawHand>>> {
        self()
    }
}

/// Receives the results of the detection cycle.
pub trait Presenter {
    /// Displays the best gesture of the first hand, or clears the display if no gesture matched
    /// or the hand could not be classified.
    fn show_gesture(&mut self, gesture: Option<&GestureMatch>);

    /// Draws the raw landmarks of all hands of a completed acquisition.
    fn draw_hands(&mut self, hands: &[RawHand]) {
        let _ = hands;
    }
}

/// Counters describing the activity of a [`DetectionCycle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Acquisitions started.
    pub acquisitions: u64,
    /// Acquisitions that resolved and were processed.
    pub completed: u64,
    /// Ticks dropped because an acquisition was still in flight.
    pub dropped: u64,
    /// Hands that could not be classified.
    pub rejected: u64,
}

/// What a call to [`DetectionCycle::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new acquisition was started.
    Acquired,
    /// The previous acquisition was still in flight.
    Dropped,
    /// The source was not ready.
    NotReady,
}

/// Drives a [`LandmarkSource`] and presents the classified gestures.
pub struct DetectionCycle<'r, S, P> {
    estimator: Estimator<'r>,
    source: S,
    presenter: P,
    min_confidence: f32,
    in_flight: Option<PromiseHandle<Vec<RawHand>>>,
    stats: CycleStats,
    fps: FpsCounter,
}

impl<'r, S: LandmarkSource, P: Presenter> DetectionCycle<'r, S, P> {
    pub fn new(estimator: Estimator<'r>, source: S, presenter: P) -> Self {
        Self {
            estimator,
            source,
            presenter,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            in_flight: None,
            stats: CycleStats::default(),
            fps: FpsCounter::new("detection"),
        }
    }

    /// Sets the minimum score a gesture needs to be presented.
    pub fn min_confidence(self, min_confidence: f32) -> Self {
        Self {
            min_confidence,
            ..self
        }
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns whether an acquisition is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Handles a scheduler tick.
    ///
    /// Finishes the in-flight acquisition if it has resolved. If it is still pending, the tick is
    /// dropped. Otherwise a new acquisition is started.
    pub fn tick(&mut self) -> TickOutcome {
        self.poll();
        if self.in_flight.is_some() {
            self.stats.dropped += 1;
            log::trace!("acquisition still in flight, dropping tick");
            return TickOutcome::Dropped;
        }

        match self.source.acquire() {
            Some(handle) => {
                self.stats.acquisitions += 1;
                self.in_flight = Some(handle);
                // Synchronous sources resolve right away.
                self.poll();
                TickOutcome::Acquired
            }
            None => {
                log::trace!("landmark source not ready, skipping tick");
                TickOutcome::NotReady
            }
        }
    }

    /// Processes the in-flight acquisition if it has resolved.
    ///
    /// Returns `true` if a cycle was completed.
    pub fn poll(&mut self) -> bool {
        if self.in_flight.as_ref().map_or(true, PromiseHandle::will_block) {
            return false;
        }
        let Some(handle) = self.in_flight.take() else {
            return false;
        };
        let hands = match handle.block() {
            Ok(hands) => hands,
            Err(_) => {
                log::trace!("acquisition dropped without result");
                Vec::new()
            }
        };
        self.complete(&hands);
        true
    }

    fn complete(&mut self, hands: &[RawHand]) {
        self.stats.completed += 1;
        self.presenter.draw_hands(hands);

        if let Some(hand) = hands.first() {
            match self.estimator.estimate_raw(hand, self.min_confidence) {
                Ok(estimation) => {
                    if let Some(best) = estimation.best() {
                        log::trace!("{} ({:.3})", best.name, best.score);
                    }
                    self.presenter.show_gesture(estimation.best());
                }
                Err(e) => {
                    self.stats.rejected += 1;
                    log::warn!("{e}");
                    self.presenter.show_gesture(None);
                }
            }
        }

        self.fps.tick_with(self.estimator.timers());
    }

    /// Runs the cycle on the ticks of `scheduler` until `stop` returns `true`.
    ///
    /// `stop` is checked after every tick and every completed cycle. The scheduler is stopped when
    /// this returns.
    pub fn run<C, F>(&mut self, scheduler: &mut Scheduler<C>, mut stop: F) -> CycleStats
    where
        C: Clock,
        F: FnMut(&CycleStats) -> bool,
    {
        scheduler.start();
        while !stop(&self.stats) {
            if scheduler.poll_tick() {
                self.tick();
                continue;
            }
            if self.poll() {
                continue;
            }

            let wait = scheduler
                .until_next_tick()
                .unwrap_or(POLL_INTERVAL)
                .min(POLL_INTERVAL);
            thread::sleep(wait);
        }
        scheduler.stop();

        log::debug!("detection cycle stopped: {:?}", self.stats);
        self.stats
    }
}
