//! Simulation time model.
//!
//! The frame driver calls the world with a variable `delta_time` in seconds.
//! `Tick` counts those calls; `SimClock` accumulates the simulated seconds.
//! Nothing in the core depends on wall-clock time.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed `World::tick` calls.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current tick plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
    /// Simulated seconds since the world was created.  `f64` so long
    /// sessions do not lose precision.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `delta_secs` seconds.
    #[inline]
    pub fn advance(&mut self, delta_secs: f32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += f64::from(delta_secs);
    }

    /// Elapsed time as `(minutes, seconds)` for log lines.
    pub fn elapsed_min_sec(&self) -> (u64, u32) {
        let total = self.elapsed_secs.max(0.0) as u64;
        (total / 60, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_min_sec();
        write!(f, "{} ({m}:{s:02})", self.current_tick)
    }
}
