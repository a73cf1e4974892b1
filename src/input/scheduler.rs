//! Fixed-rate tick scheduling decoupled from the host's frame rate.

use ::tracing::{trace, warn};

/// Accumulated lag, in seconds, at or beyond which the scheduler stops trying
/// to catch up tick by tick and instead performs a single step covering the
/// whole lag.
pub const MAX_ACCUMULATED_LAG: f64 = 1.0;

/// Something driven one step at a time by an [`UpdateScheduler`].
pub trait Tick {
    /// Advance by `dt` seconds. Returns `false` to request shutdown.
    fn tick(&mut self, dt: f64) -> bool;
}

impl<F> Tick for F
where
    F: FnMut(f64) -> bool,
{
    fn tick(&mut self, dt: f64) -> bool {
        self(dt)
    }
}

/// Converts variable wall-clock deltas into a sequence of fixed-length ticks.
///
/// Each call to [`advance`](Self::advance) adds the elapsed time to an
/// accumulator and then:
///
/// * if more than one interval, but less than [`MAX_ACCUMULATED_LAG`], has
///   accumulated, runs fixed ticks until less than one interval remains. The
///   remainder carries over to the next call.
/// * if less than one interval has accumulated, does nothing.
/// * otherwise (the simulation has fallen far behind), runs exactly one tick
///   whose length is the entire accumulated time and clears the accumulator,
///   rather than bursting through a long run of catch-up ticks.
///
/// ```
/// use ::helm_input::input::scheduler::UpdateScheduler;
///
/// let mut scheduler = UpdateScheduler::new(1.0 / 30.0);
/// let mut ticks = Vec::new();
///
/// assert!(scheduler.advance(0.04, &mut |dt: f64| { ticks.push(dt); true }));
/// assert!(scheduler.advance(0.0, &mut |dt: f64| { ticks.push(dt); true }));
/// assert_eq!(ticks.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateScheduler {
    interval: f64,
    elapsed: f64,
}

impl UpdateScheduler {
    /// A scheduler producing ticks of `interval` seconds.
    pub fn new(interval: f64) -> Self {
        debug_assert!(interval > 0.0, "tick interval must be positive");
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// A scheduler producing `rate` ticks per second.
    pub fn with_rate(rate: f64) -> Self {
        Self::new(1.0 / rate)
    }

    /// The fixed tick length in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Time accumulated towards the next tick.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Account for `delta` seconds of wall-clock time, running as many ticks of
    /// `target` as that time calls for.
    ///
    /// Returns `false` as soon as a tick requests shutdown; no further ticks
    /// run in that call. Negative and non-finite deltas are treated as zero.
    pub fn advance<T>(&mut self, delta: f64, target: &mut T) -> bool
    where
        T: Tick + ?Sized,
    {
        if !(delta.is_finite() && delta >= 0.0) {
            warn!(delta, "Invalid time delta, ignoring");
        } else {
            self.elapsed += delta;
        }

        if self.elapsed > self.interval && self.elapsed < MAX_ACCUMULATED_LAG {
            while self.elapsed > self.interval {
                if !target.tick(self.interval) {
                    return false;
                }
                self.elapsed -= self.interval;
            }
        } else if self.elapsed < self.interval {
            trace!(elapsed = self.elapsed, "Not enough time for a tick");
        } else {
            warn!(
                elapsed = self.elapsed,
                "Simulation fell behind, running a single catch-up step"
            );
            let step = self.elapsed;
            // Cleared before stepping so the scheduler is never left behind,
            // even if the step requests shutdown.
            self.elapsed = 0.0;
            if !target.tick(step) {
                return false;
            }
        }

        true
    }

    /// Discard any accumulated time.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
