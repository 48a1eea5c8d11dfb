//! ccsim — run one call-center simulation from a design's YAML document.
//!
//! Loads `config/<design>_data.yaml`, builds the compatibility graph for the
//! named topology, runs the tick loop with the CLI defaults (T = 360 000 s,
//! AWT = 20 s, SL threshold 80 %, seed 999, policy G), and prints the
//! per-class / per-pool summary plus the evaluator score.  `--output-dir`
//! additionally writes the sampled KPI series as CSV, ready for plotting.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cc_core::{SimParams, Tick};
use cc_output::{CsvMetricsWriter, KpiOutputObserver, MetricsWriter};
use cc_scenario::{Scenario, ScenarioData, Topology};
use cc_sim::{KpiReport, Metrics, SimBuilder, SimObserver};

// ── CLI arguments ─────────────────────────────────────────────────────────────

/// Multi-skill call-center simulator.
#[derive(Parser, Debug)]
#[command(name = "ccsim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Design to simulate: Xdesign | Ndesign | Wdesign | general_design.
    design: String,

    /// Directory holding the `<design>_data.yaml` documents.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Simulated horizon in seconds.
    #[arg(long, default_value_t = 360_000)]
    horizon_secs: u64,

    /// Acceptable waiting time in seconds.
    #[arg(long, default_value_t = 20)]
    awt_secs: u64,

    /// Service-level threshold as a fraction.
    #[arg(long, default_value_t = 0.80)]
    sl_threshold: f64,

    /// Master RNG seed.
    #[arg(long, default_value_t = 999)]
    seed: u64,

    /// Routing policy key.
    #[arg(long, default_value = "G")]
    policy: String,

    /// Write sampled KPI series as CSV into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Sampling interval for CSV output and progress lines, in ticks.
    #[arg(long, default_value_t = 60)]
    sample_interval: u64,
}

/// Map a design name to its topology.
fn topology_for_design(design: &str) -> Result<Topology> {
    match design {
        "Xdesign" => Ok(Topology::X),
        "Ndesign" => Ok(Topology::N),
        "Wdesign" => Ok(Topology::W),
        "general_design" => Ok(Topology::General),
        other => bail!(
            "unknown design {other:?} (expected Xdesign, Ndesign, Wdesign, or general_design)"
        ),
    }
}

// ── Progress + optional CSV observer ──────────────────────────────────────────

/// Prints a progress line at every sample and forwards to the CSV observer
/// when one is configured.
struct CliObserver<W: MetricsWriter> {
    csv:        Option<KpiOutputObserver<W>>,
    horizon:    u64,
    last_print: Instant,
}

impl<W: MetricsWriter> CliObserver<W> {
    fn new(csv: Option<KpiOutputObserver<W>>, horizon: u64) -> Self {
        Self {
            csv,
            horizon,
            last_print: Instant::now(),
        }
    }
}

impl<W: MetricsWriter> SimObserver for CliObserver<W> {
    fn on_sample(&mut self, tick: Tick, metrics: &Metrics) {
        if let Some(csv) = &mut self.csv {
            csv.on_sample(tick, metrics);
        }
        // One progress line per wall-clock second keeps long runs readable.
        if self.last_print.elapsed().as_secs() >= 1 {
            self.last_print = Instant::now();
            let done = tick.0 as f64 / self.horizon.max(1) as f64 * 100.0;
            eprintln!("  t = {:>7} s  ({done:>5.1} %)", tick.0);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, report: &KpiReport) {
        if let Some(csv) = &mut self.csv {
            csv.on_sim_end(final_tick, report);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load the scenario document.
    let topology = topology_for_design(&args.design)?;
    let path = args.config_dir.join(format!("{}_data.yaml", args.design));
    let data: ScenarioData = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .build()
        .and_then(|document| document.try_deserialize())
        .with_context(|| format!("loading scenario document {}", path.display()))?;

    // 2. Build the compatibility graph.
    let scenario = Scenario::build(topology, &data)
        .with_context(|| format!("building the {topology} design"))?;
    println!("=== ccsim — {} ===", args.design);
    print!("{}", scenario.describe());
    println!(
        "horizon {} s | AWT {} s | SL threshold {:.0} % | seed {} | policy {}",
        args.horizon_secs,
        args.awt_secs,
        args.sl_threshold * 100.0,
        args.seed,
        args.policy,
    );
    println!();

    // 3. Assemble parameters and the simulator.
    let params = SimParams {
        horizon_secs:          args.horizon_secs,
        awt_secs:              args.awt_secs,
        sl_threshold:          args.sl_threshold,
        seed:                  args.seed,
        call_flow_size:        100_000,
        sample_interval_ticks: args.sample_interval,
    };
    let mut sim = SimBuilder::new(scenario.clone(), params)
        .policy_key(&args.policy)
        .build()?;

    // 4. Optional CSV output.
    let csv = match &args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            let writer = CsvMetricsWriter::new(dir)?;
            log::info!("writing KPI series to {}", dir.display());
            Some(KpiOutputObserver::new(writer, &scenario))
        }
        None => None,
    };
    let mut observer = CliObserver::new(csv, args.horizon_secs);

    // 5. Run.
    let started = Instant::now();
    let summary = sim.run(&mut observer)?;
    let elapsed = started.elapsed();
    if let Some(csv) = &mut observer.csv {
        if let Some(e) = csv.take_error() {
            eprintln!("output error: {e}");
        }
    }

    // 6. Summary tables.
    println!("simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!("{:<8} {:>14} {:>15} {:>10}", "Class", "Service level", "Abandon ratio", "Arrivals");
    println!("{}", "-".repeat(50));
    for (index, class) in scenario.classes().iter().enumerate() {
        let counters = sim.metrics().counters(cc_core::ClassId(index as u16));
        println!(
            "{:<8} {:>14.4} {:>15.4} {:>10}",
            class.label,
            summary.report.service_level[index],
            summary.report.abandon_ratio[index],
            counters.arrivals,
        );
    }
    println!();
    println!("{:<8} {:>10} {:>12}", "Pool", "Capacity", "Occupancy");
    println!("{}", "-".repeat(32));
    for (index, pool) in scenario.pools().iter().enumerate() {
        println!(
            "{:<8} {:>10} {:>12.4}",
            pool.label,
            pool.capacity,
            summary.report.occupancy[index],
        );
    }
    println!();
    println!("Performance evaluation: {:.6}", summary.score);

    Ok(())
}
