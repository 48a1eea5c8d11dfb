//! Plain data row types written by output backends.

/// One class's KPIs at a sampled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassKpiRow {
    pub tick:          u64,
    /// External class label, e.g. `c1`.
    pub class:         String,
    pub service_level: f64,
    pub abandon_ratio: f64,
}

/// One pool's load at a sampled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolKpiRow {
    pub tick:      u64,
    /// External pool label, e.g. `s1`.
    pub pool:      String,
    /// Agents busy at the sample instant.
    pub busy:      u32,
    /// Busy fraction at the sample instant.
    pub occupancy: f64,
}
