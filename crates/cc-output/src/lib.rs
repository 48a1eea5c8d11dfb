//! `cc-output` — KPI series writers for the rust_cc simulator.
//!
//! The CSV backend creates two files in the configured output directory:
//!
//! | File             | Columns                                    |
//! |------------------|--------------------------------------------|
//! | `class_kpis.csv` | tick, class, service_level, abandon_ratio  |
//! | `pool_kpis.csv`  | tick, pool, busy, occupancy                |
//!
//! One row pair lands per sampling interval, which is what a plotting tool
//! needs to draw the SL / abandonment / occupancy curves.  Writers implement
//! [`MetricsWriter`] and are driven by [`KpiOutputObserver`], which
//! implements `cc_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cc_output::{CsvMetricsWriter, KpiOutputObserver};
//!
//! let writer = CsvMetricsWriter::new(Path::new("./output"))?;
//! let mut obs = KpiOutputObserver::new(writer, &scenario);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvMetricsWriter;
pub use error::{OutputError, OutputResult};
pub use observer::KpiOutputObserver;
pub use row::{ClassKpiRow, PoolKpiRow};
pub use writer::MetricsWriter;
