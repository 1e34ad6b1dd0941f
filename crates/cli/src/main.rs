use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use hps::{Checkpoint, Measure, RunCfg};
use tracing_subscriber::fmt::SubscriberBuilder;

mod args;

#[derive(Parser)]
#[command(name = "hps")]
#[command(about = "Estimate how often air particles strike a pollen mesh (hits per second)")]
struct Cmd {
    /// Mesh file, or the sample count when given alone as a plain integer
    #[arg(value_name = "MESH|SAMPLES")]
    first: Option<String>,
    /// Angle samples per axis; the grid has SAMPLES² directions
    #[arg(value_name = "SAMPLES")]
    second: Option<String>,
    /// Hull quantity summed over directions
    #[arg(long, value_enum, default_value_t = MeasureArg::Area)]
    measure: MeasureArg,
    /// Radius of the sampling sphere
    #[arg(long, default_value_t = hps::DEFAULT_STRETCH)]
    stretch: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum MeasureArg {
    Area,
    /// Hull boundary length (the quantity older tooling reported as "area")
    Perimeter,
}

impl From<MeasureArg> for Measure {
    fn from(m: MeasureArg) -> Self {
        match m {
            MeasureArg::Area => Measure::Area,
            MeasureArg::Perimeter => Measure::Perimeter,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let inv = match args::resolve(cmd.first.as_deref(), cmd.second.as_deref()) {
        Ok(inv) => inv,
        Err(e) => Cmd::command().error(ErrorKind::InvalidValue, e).exit(),
    };
    let cfg = RunCfg {
        samples: inv.samples,
        stretch: cmd.stretch,
        measure: cmd.measure.into(),
    };
    tracing::info!(
        mesh = %inv.mesh.display(),
        samples = cfg.samples,
        stretch = cfg.stretch,
        measure = ?cfg.measure,
        "run"
    );
    let mut sink = log_checkpoint;
    let est = hps::run(&inv.mesh, &cfg, &mut sink)
        .with_context(|| format!("estimating hits per second for {}", inv.mesh.display()))?;
    tracing::info!(
        directions = est.directions,
        fallback_bases = est.fallback_bases,
        degenerate_projections = est.degenerate_projections,
        mean = est.mean(),
        "summary"
    );
    println!("Final answer: {}", est.total);
    Ok(())
}

fn log_checkpoint(c: Checkpoint) {
    match c {
        Checkpoint::MeshLoaded { vertices } => tracing::info!(vertices, "mesh_loaded"),
        Checkpoint::DirectionsGenerated { count } => {
            tracing::info!(count, "directions_generated")
        }
        Checkpoint::BasesBuilt { count, fallbacks } => {
            tracing::info!(count, fallbacks, "bases_built")
        }
        Checkpoint::AggregationComplete { total } => tracing::info!(total, "aggregation_complete"),
    }
}
