//! `KpiOutputObserver<W>` — bridges `SimObserver` to a `MetricsWriter`.

use cc_core::Tick;
use cc_scenario::Scenario;
use cc_sim::{KpiReport, Metrics, SimObserver};

use crate::row::{ClassKpiRow, PoolKpiRow};
use crate::writer::MetricsWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes sampled KPI rows to any [`MetricsWriter`]
/// backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct KpiOutputObserver<W: MetricsWriter> {
    writer:       W,
    class_labels: Vec<String>,
    pool_labels:  Vec<String>,
    last_error:   Option<OutputError>,
}

impl<W: MetricsWriter> KpiOutputObserver<W> {
    /// Create an observer backed by `writer`, taking the external labels
    /// from `scenario`.
    pub fn new(writer: W, scenario: &Scenario) -> Self {
        Self {
            writer,
            class_labels: scenario.classes().iter().map(|c| c.label.clone()).collect(),
            pool_labels:  scenario.pools().iter().map(|p| p.label.clone()).collect(),
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: MetricsWriter> SimObserver for KpiOutputObserver<W> {
    fn on_sample(&mut self, tick: Tick, metrics: &Metrics) {
        let class_rows: Vec<ClassKpiRow> = self
            .class_labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let class = cc_core::ClassId(index as u16);
                ClassKpiRow {
                    tick:          tick.0,
                    class:         label.clone(),
                    service_level: metrics.service_level(class),
                    abandon_ratio: metrics.abandon_ratio(class),
                }
            })
            .collect();
        let result = self.writer.write_class_kpis(&class_rows);
        self.store_err(result);

        let pool_rows: Vec<PoolKpiRow> = self
            .pool_labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let pool = cc_core::PoolId(index as u16);
                let busy = metrics.busy_series(pool).last().copied().unwrap_or(0);
                let occupancy = metrics
                    .occupancy_series(pool)
                    .last()
                    .copied()
                    .unwrap_or(0.0);
                PoolKpiRow {
                    tick: tick.0,
                    pool: label.clone(),
                    busy,
                    occupancy,
                }
            })
            .collect();
        let result = self.writer.write_pool_kpis(&pool_rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _report: &KpiReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
