use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use tidal_hydro::{
    initialization::initialize_setup,
    io::{
        param_parser::SimulationParamParser,
        write_to_csv::{Snapshot, write_snapshot},
    },
    solver::HydroSim,
};

/// Tidal compression of a polytropic star on a parabolic orbit around a black hole
#[derive(Parser)]
#[command(name = "tidal-hydro")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Run configuration (JSON)
    #[arg(short, long, default_value = "inputs/simparam.json")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Decides when the central density history warrants a new snapshot.
struct SnapshotTrigger {
    interval: f64,
    last_time: f64,
    last_density: f64,
    max_density: f64,
}
impl SnapshotTrigger {
    fn new(interval: f64, time: f64, density: f64) -> Self {
        Self {
            interval,
            last_time: time,
            last_density: density,
            max_density: density,
        }
    }
    /// True when `interval` has elapsed or the central density left the 2 % band.
    fn is_due(&self, time: f64, density: f64) -> bool {
        time - self.last_time > self.interval
            || density > 1.02 * self.max_density
            || density * 1.02 < self.last_density
    }
    fn record(&mut self, time: f64, density: f64) {
        self.last_time = time;
        self.last_density = density;
        self.max_density = self.max_density.max(density);
    }
}

fn save_snapshot(dir: &Path, sim: &HydroSim<'_>, counter: &mut usize) -> anyhow::Result<()> {
    let path = dir.join(format!("tide_{counter}.csv"));
    write_snapshot(&path, &Snapshot::from_sim(sim))
        .with_context(|| format!("writing {}", path.display()))?;
    *counter += 1;
    Ok(())
}

fn run(params: &SimulationParamParser) -> anyhow::Result<()> {
    let setup = initialize_setup(params)?;
    let mut sim = HydroSim::new(
        params.cfl,
        setup.cells.clone(),
        setup.edges.clone(),
        &setup.interp,
        &setup.eos,
        setup.riemann_solver.as_ref(),
        &setup.gravity,
    )?;
    sim.set_time(setup.encounter.start_time);
    fs::create_dir_all(&params.output_dir)
        .with_context(|| format!("creating {}", params.output_dir.display()))?;

    let initial_density = sim.cells()[0].density;
    let mut trigger = SnapshotTrigger::new(params.snapshot_interval, sim.time(), initial_density);
    let mut counter = 0;
    save_snapshot(&params.output_dir, &sim, &mut counter)?;

    loop {
        let density = sim.cells()[0].density;
        let threshold = (0.25 * initial_density).max(0.1 * trigger.max_density);
        if density <= threshold {
            warn!(density, threshold, time = sim.time(), "central density dropped, stopping");
            break;
        }
        if sim.time() >= params.final_time {
            info!(time = sim.time(), "final time reached");
            break;
        }
        if sim.cycle() % params.log_interval == 0 {
            info!(time = sim.time(), cycle = sim.cycle(), central_density = density);
        }
        sim.time_advance2()
            .with_context(|| format!("cycle {} at time {}", sim.cycle(), sim.time()))?;
        let density = sim.cells()[0].density;
        if trigger.is_due(sim.time(), density) {
            save_snapshot(&params.output_dir, &sim, &mut counter)?;
            trigger.record(sim.time(), density);
        }
    }
    info!(cycles = sim.cycle(), snapshots = counter, "done");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let params = SimulationParamParser::parse(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    run(&params)
}
