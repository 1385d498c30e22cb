//! Wall-clock timing.

use std::time::{Duration, Instant};

/// Source of monotonic time. The driver only asks for the time since some
/// fixed origin, so test doubles can hand out scripted readings.
pub trait Clock: Sync {
    fn now(&self) -> Duration;
}

/// `Instant`-backed clock measuring from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Runs `f` once and returns its output with the elapsed time.
pub fn measure<C, T, F>(clock: &C, f: F) -> (T, Duration)
where
    C: Clock + ?Sized,
    F: FnOnce() -> T,
{
    let start = clock.now();
    let out = f();
    let end = clock.now();
    (out, end.saturating_sub(start))
}

/// Runs `f` `runs` times (at least once) and returns the last output with the
/// mean elapsed time.
pub fn measure_mean<C, T, F>(clock: &C, runs: usize, mut f: F) -> (T, Duration)
where
    C: Clock + ?Sized,
    F: FnMut() -> T,
{
    let runs = runs.max(1);
    let mut total = Duration::ZERO;
    let (mut out, first) = measure(clock, &mut f);
    total += first;
    for _ in 1..runs {
        let (next, elapsed) = measure(clock, &mut f);
        out = next;
        total += elapsed;
    }
    (out, total / runs as u32)
}
