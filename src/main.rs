/*
 * Flock Simulation Driver
 *
 * A headless host for the simulation core. It builds a world from defaults,
 * an optional JSON config and command-line overrides, runs a fixed number of
 * ticks, and logs a summary at a regular interval. With --dump the final
 * flock state is printed to stdout as JSON for other tools to consume.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flocks::{config, SimulationParams, SpawnPattern, TickStats, World, DEFAULT_DT};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "flocks", about = "Run a headless boid flocking simulation")]
struct Args {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f32,

    #[arg(long)]
    flocks: Option<u32>,

    #[arg(long)]
    agents_per_axis: Option<u32>,

    #[arg(long)]
    speed: Option<f32>,

    /// Scatter boids randomly with this seed instead of using the lattice
    #[arg(long)]
    seed: Option<u64>,

    /// Half-extent of the scatter cube
    #[arg(long, default_value_t = 5.0)]
    scatter_radius: f32,

    /// Log a summary every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Print the final flock state as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let params = build_params(&args)?;
    let mut world = World::spawn(params).context("failed to spawn world")?;
    info!(
        ticks = args.ticks,
        dt = args.dt,
        boids = world.agent_count(),
        "Starting flock simulation"
    );

    let mut last = TickStats::default();
    for _ in 0..args.ticks {
        last = world
            .advance_tick(args.dt)
            .with_context(|| format!("tick {} failed", world.tick() + 1))?;

        if args.report_every > 0 && last.tick % args.report_every == 0 {
            report(&world, &last);
        }
    }

    info!(
        tick = world.tick(),
        degenerate = last.degenerate_directions,
        "Simulation finished"
    );

    if args.dump {
        let json = serde_json::to_string_pretty(world.flocks()).context("failed to serialize flocks")?;
        println!("{json}");
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// Layer command-line overrides on top of the config file (or defaults)
fn build_params(args: &Args) -> Result<SimulationParams> {
    let mut params = match &args.config {
        Some(path) => config::load_params(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationParams::default(),
    };

    if let Some(flocks) = args.flocks {
        params.flock_count = flocks;
    }
    if let Some(agents) = args.agents_per_axis {
        params.agents_per_axis = agents;
    }
    if let Some(speed) = args.speed {
        params.speed = speed;
    }
    if let Some(seed) = args.seed {
        params.spawn = SpawnPattern::Scatter {
            radius: args.scatter_radius,
            seed,
        };
    }

    params.validate_for_spawn().context("invalid simulation parameters")?;
    Ok(params)
}

fn report(world: &World, stats: &TickStats) {
    for flock in world.flocks() {
        let c = flock.centroid();
        let centroid = format!("({:.2}, {:.2}, {:.2})", c.x, c.y, c.z);
        info!(
            tick = stats.tick,
            flock = %flock.id(),
            centroid = %centroid,
            heading = ?flock.average_direction(),
            "Flock state"
        );
    }

    info!(
        tick = stats.tick,
        mean_neighbors = stats.mean_neighbors(),
        bounded = stats.bounded_boids,
        degenerate = stats.degenerate_directions,
        micros = stats.duration.as_micros() as u64,
        "Tick summary"
    );
}
