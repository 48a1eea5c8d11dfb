//! Serde image of the scenario document.
//!
//! The on-disk shape mirrors the original configuration format: `s` lists
//! pool capacities, `c`/`v` list per-class arrival and patience rates, `mu`
//! carries the I×K service-rate matrix (entries ≤ 0 mean "no edge"), and
//! `distribution` names the stochastic model.  All rates are per minute.
//!
//! Only the (poisson, exponential, exponential) combination exists; the
//! single-variant enums make any other document fail at deserialization
//! time, which is the required report-at-construction behavior.

use serde::Deserialize;

/// A per-class rate list (`args: [18.0, 1.8]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateSpec {
    pub args: Vec<f64>,
}

/// The I×K service-rate matrix (`args: [[0.198, 0.18], [0.162, 0.18]]`).
///
/// Row i belongs to pool i, column j to class j.  An entry ≤ 0 removes the
/// edge: that pool cannot serve that class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatrixSpec {
    pub args: Vec<Vec<f64>>,
}

/// Supported arrival processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalDist {
    Poisson,
}

/// Supported service-time distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceDist {
    Exponential,
}

/// Supported patience distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatienceDist {
    Exponential,
}

/// The `distribution` block of a scenario document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DistributionSpec {
    pub arrival:  ArrivalDist,
    pub service:  ServiceDist,
    pub patience: PatienceDist,
}

impl Default for DistributionSpec {
    fn default() -> Self {
        Self {
            arrival:  ArrivalDist::Poisson,
            service:  ServiceDist::Exponential,
            patience: PatienceDist::Exponential,
        }
    }
}

/// A full scenario document, as deserialized from `config/<design>_data.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioData {
    /// Ordered pool capacities.
    pub s: Vec<u32>,
    /// Arrival rates λ per class, per minute.
    pub c: RateSpec,
    /// Service rates μ, I×K, per minute.
    pub mu: MatrixSpec,
    /// Patience (abandonment) rates ν per class, per minute.
    pub v: RateSpec,
    /// Stochastic model.  Defaults to the only supported combination when
    /// the block is omitted.
    #[serde(default)]
    pub distribution: DistributionSpec,
}
