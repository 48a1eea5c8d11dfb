//! The `MetricsWriter` trait implemented by all backend writers.

use crate::{ClassKpiRow, OutputResult, PoolKpiRow};

/// Trait implemented by KPI output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`KpiOutputObserver::take_error`][crate::KpiOutputObserver::take_error].
pub trait MetricsWriter {
    /// Write one sampled tick's class rows.
    fn write_class_kpis(&mut self, rows: &[ClassKpiRow]) -> OutputResult<()>;

    /// Write one sampled tick's pool rows.
    fn write_pool_kpis(&mut self, rows: &[PoolKpiRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
