//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `class_kpis.csv`
//! - `pool_kpis.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::MetricsWriter;
use crate::{ClassKpiRow, OutputResult, PoolKpiRow};

/// Writes sampled KPI series to two CSV files.
pub struct CsvMetricsWriter {
    classes:  Writer<File>,
    pools:    Writer<File>,
    finished: bool,
}

impl CsvMetricsWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut classes = Writer::from_path(dir.join("class_kpis.csv"))?;
        classes.write_record(["tick", "class", "service_level", "abandon_ratio"])?;

        let mut pools = Writer::from_path(dir.join("pool_kpis.csv"))?;
        pools.write_record(["tick", "pool", "busy", "occupancy"])?;

        Ok(Self {
            classes,
            pools,
            finished: false,
        })
    }
}

impl MetricsWriter for CsvMetricsWriter {
    fn write_class_kpis(&mut self, rows: &[ClassKpiRow]) -> OutputResult<()> {
        for row in rows {
            self.classes.write_record(&[
                row.tick.to_string(),
                row.class.clone(),
                row.service_level.to_string(),
                row.abandon_ratio.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_pool_kpis(&mut self, rows: &[PoolKpiRow]) -> OutputResult<()> {
        for row in rows {
            self.pools.write_record(&[
                row.tick.to_string(),
                row.pool.clone(),
                row.busy.to_string(),
                row.occupancy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.classes.flush()?;
        self.pools.flush()?;
        Ok(())
    }
}
