//! KPI counters, per-tick time series, and the final report.

use cc_agent::AgentPool;
use cc_core::{ClassId, PoolId};

// ── Counters ──────────────────────────────────────────────────────────────────

/// Cumulative per-class counters.
///
/// Relations that hold at every tick: `served ≥ good_sl` and
/// `abandoned ≥ abandoned_after_awt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounters {
    /// Arrivals consumed from the class's stream.
    pub arrivals: u64,
    /// Calls whose service started within the acceptable waiting time
    /// (immediate service counts: zero wait is trivially within AWT).
    pub good_sl: u64,
    /// Calls whose service started, on arrival or on dequeue.
    pub served: u64,
    /// Calls whose patience expired before service.
    pub abandoned: u64,
    /// Subset of `abandoned` that waited longer than the AWT.
    pub abandoned_after_awt: u64,
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// All simulation statistics: cumulative counters plus the per-tick series
/// sampled once per loop iteration.
///
/// The ratio conventions are part of the evaluator contract: an empty
/// denominator reads as 1 (a warm-up tick has a perfect service level and,
/// symmetrically, a unit abandonment ratio).
#[derive(Debug)]
pub struct Metrics {
    classes: Vec<ClassCounters>,

    // Per-class series, one sample per tick.
    sl_series:      Vec<Vec<f64>>,
    abandon_series: Vec<Vec<f64>>,

    // Per-pool series, one sample per tick.
    busy_series:      Vec<Vec<u32>>,
    occupancy_series: Vec<Vec<f64>>,
}

impl Metrics {
    pub fn new(class_count: usize, pool_count: usize) -> Self {
        Self {
            classes:          vec![ClassCounters::default(); class_count],
            sl_series:        vec![Vec::new(); class_count],
            abandon_series:   vec![Vec::new(); class_count],
            busy_series:      vec![Vec::new(); pool_count],
            occupancy_series: vec![Vec::new(); pool_count],
        }
    }

    // ── Counter updates ───────────────────────────────────────────────────

    pub fn record_arrival(&mut self, class: ClassId) {
        self.classes[class.index()].arrivals += 1;
    }

    pub fn record_served(&mut self, class: ClassId, within_awt: bool) {
        let counters = &mut self.classes[class.index()];
        counters.served += 1;
        if within_awt {
            counters.good_sl += 1;
        }
    }

    pub fn record_abandoned(&mut self, class: ClassId, after_awt: bool) {
        let counters = &mut self.classes[class.index()];
        counters.abandoned += 1;
        if after_awt {
            counters.abandoned_after_awt += 1;
        }
    }

    // ── Current ratios ────────────────────────────────────────────────────

    /// `good_sl / (served + abandoned_after_awt)`, or 1 while the
    /// denominator is zero.
    pub fn service_level(&self, class: ClassId) -> f64 {
        let c = &self.classes[class.index()];
        let denominator = c.served + c.abandoned_after_awt;
        if denominator == 0 {
            1.0
        } else {
            c.good_sl as f64 / denominator as f64
        }
    }

    /// `abandoned / (served + abandoned)`, or 1 while the denominator is
    /// zero.
    pub fn abandon_ratio(&self, class: ClassId) -> f64 {
        let c = &self.classes[class.index()];
        let denominator = c.served + c.abandoned;
        if denominator == 0 {
            1.0
        } else {
            c.abandoned as f64 / denominator as f64
        }
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// Append the current tick's sample to every series.  Called once per
    /// loop iteration, after event dispatch.
    pub fn sample(&mut self, pools: &[AgentPool]) {
        for index in 0..self.classes.len() {
            let class = ClassId(index as u16);
            let sl = self.service_level(class);
            let abandon = self.abandon_ratio(class);
            self.sl_series[index].push(sl);
            self.abandon_series[index].push(abandon);
        }
        for (index, pool) in pools.iter().enumerate() {
            self.busy_series[index].push(pool.busy_count());
            self.occupancy_series[index].push(pool.occupancy_unit());
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn counters(&self, class: ClassId) -> &ClassCounters {
        &self.classes[class.index()]
    }

    pub fn sl_series(&self, class: ClassId) -> &[f64] {
        &self.sl_series[class.index()]
    }

    pub fn abandon_series(&self, class: ClassId) -> &[f64] {
        &self.abandon_series[class.index()]
    }

    pub fn busy_series(&self, pool: PoolId) -> &[u32] {
        &self.busy_series[pool.index()]
    }

    pub fn occupancy_series(&self, pool: PoolId) -> &[f64] {
        &self.occupancy_series[pool.index()]
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn pool_count(&self) -> usize {
        self.busy_series.len()
    }

    /// Number of samples taken so far (equals the ticks completed).
    pub fn sample_count(&self) -> usize {
        self.sl_series.first().map_or(0, Vec::len)
    }

    // ── Final report ──────────────────────────────────────────────────────

    /// Assemble the end-of-run KPIs.  Pool occupancy is the time average
    /// `Σ_t busy[t] / (capacity · T)`; a zero-length horizon reads as 0.
    pub fn final_report(&self, horizon_secs: u64, pools: &[AgentPool]) -> KpiReport {
        let service_level = (0..self.classes.len() as u16)
            .map(|c| self.service_level(ClassId(c)))
            .collect();
        let abandon_ratio = (0..self.classes.len() as u16)
            .map(|c| self.abandon_ratio(ClassId(c)))
            .collect();
        let occupancy = pools
            .iter()
            .enumerate()
            .map(|(index, pool)| {
                if horizon_secs == 0 {
                    return 0.0;
                }
                let busy_total: u64 = self.busy_series[index].iter().map(|&b| b as u64).sum();
                busy_total as f64 / (pool.capacity() as u64 * horizon_secs) as f64
            })
            .collect();
        KpiReport { service_level, abandon_ratio, occupancy }
    }
}

// ── KpiReport ─────────────────────────────────────────────────────────────────

/// Final KPIs of one run, indexed by class / pool.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiReport {
    /// Final service level per class.
    pub service_level: Vec<f64>,
    /// Final abandonment ratio per class.
    pub abandon_ratio: Vec<f64>,
    /// Time-averaged busy fraction per pool.
    pub occupancy: Vec<f64>,
}
