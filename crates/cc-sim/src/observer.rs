//! Simulation observer trait for progress reporting and data collection.

use cc_core::Tick;

use crate::{KpiReport, Metrics};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers receive read-only views and
/// cannot influence the run — progress bars, KPI writers, and live charts
/// all hang off this trait.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, events: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: dispatched {events} events");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any draining.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `events` is the number of events dispatched this tick.
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {}

    /// Called at sampling intervals (every `params.sample_interval_ticks`)
    /// with the full statistics state, so output writers can record the
    /// latest samples without the simulator knowing any file format.
    fn on_sample(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// Called once after the final tick, with the assembled report.
    fn on_sim_end(&mut self, _final_tick: Tick, _report: &KpiReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
