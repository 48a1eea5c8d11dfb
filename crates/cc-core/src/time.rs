//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! simulated second.  Rates in scenario documents are per *minute*; every
//! continuous draw is converted to integer seconds at the sampling site
//! (`round(x * 60)`), so all schedule arithmetic in the engine is exact
//! integer math and comparisons are O(1).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter, in simulated seconds.
///
/// Stored as `u64`: at one tick per second this lasts ~585 billion years,
/// far longer than any conceivable horizon.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` seconds after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Seconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock — one advancing `Tick` plus display helpers.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick (one simulated second).
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Break elapsed time into (hour, minute, second) components from sim
    /// start.  Useful for human-readable progress lines without a datetime
    /// library.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total_secs = self.current_tick.0;
        let hours = total_secs / 3_600;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        let seconds = (total_secs % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// Top-level simulation parameters.
///
/// Typically assembled from CLI flags by the application crate and passed to
/// the simulator builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Total simulated seconds (the horizon T).  The loop runs ticks
    /// `0 ..= T-1`.
    pub horizon_secs: u64,

    /// Acceptable waiting time in seconds.  A served call that waited longer
    /// is not "good"; an abandoned call that waited longer counts toward
    /// `abandoned_after_awt`.
    pub awt_secs: u64,

    /// Service-level threshold in `[0, 1]`, handed to the evaluator after
    /// the run.
    pub sl_threshold: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// How many interarrival draws to pre-generate per class.  A class whose
    /// stream runs dry before the horizon simply stops arriving.
    pub call_flow_size: usize,

    /// Invoke the observer's sample hook every N ticks.  1 = every tick;
    /// 0 disables sampling callbacks (the in-memory series are unaffected).
    pub sample_interval_ticks: u64,
}

impl SimParams {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_secs)
    }
}

impl Default for SimParams {
    /// The defaults of the `ccsim` CLI: T = 360 000 s, AWT = 20 s,
    /// SL threshold = 80 %, seed 999, 100 000 pre-generated arrivals.
    fn default() -> Self {
        Self {
            horizon_secs:          360_000,
            awt_secs:              20,
            sl_threshold:          0.80,
            seed:                  999,
            call_flow_size:        100_000,
            sample_interval_ticks: 60,
        }
    }
}
