mod metrics;
mod snapshots;

use clap::Parser;
use komyaku_core::{log_parameters, seeded_rng, Simulation, SimulationConfig};
use metrics::MetricsWriter;
use snapshots::SnapshotWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "komyaku-headless")]
#[command(about = "Headless CLI runner for Komyaku blob simulations")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Output directory for results
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured step count
    #[arg(long)]
    steps: Option<u32>,

    /// Enable strict mode (fail if the population dies out)
    #[arg(long)]
    strict: bool,
}

const METRICS_EVERY: u32 = 50;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let cli = Cli::parse();

    // Load configuration
    println!("Loading configuration from {}", cli.config.display());
    let mut config: SimulationConfig =
        serde_yaml::from_str(&std::fs::read_to_string(&cli.config)?)?;
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }
    if let Some(steps) = cli.steps {
        config.world.steps = steps;
    }

    // Validate configuration
    config.validate()?;
    if config.world.steps == 0 {
        anyhow::bail!("Step count must be greater than 0.");
    }
    log_parameters(&config);

    std::fs::create_dir_all(&cli.out)?;

    let steps = config.world.steps;
    let dt = config.world.dt;
    let mut rng = seeded_rng(config.world.seed);
    let mut sim = Simulation::with_population(config, &mut rng);

    let mut metrics_writer = MetricsWriter::new(&cli.out)?;
    let snapshot_writer = SnapshotWriter::new(&cli.out)?;

    println!("Starting simulation for {} steps...", steps);
    let start_time = Instant::now();
    let mut extinct_at = None;

    for step in 0..=steps {
        let step_start = Instant::now();

        if step > 0 {
            let report = sim.step(dt, step as f32 * dt, &mut rng);
            if report.splits > 0 || report.deaths > 0 || report.truncated > 0 {
                log::debug!("step {}: {:?}", step, report);
            }
        }

        if step % METRICS_EVERY == 0 || step == steps {
            sim.update_stats();
            let step_time = step_start.elapsed();
            metrics_writer.write_step(step, &sim.stats, step_time)?;

            println!(
                "Step {}: Blobs={}, Dying={}, Splitting={}, Births={}, Deaths={}, Time={:?}",
                step,
                sim.stats.alive_count,
                sim.stats.dying_count,
                sim.stats.splitting_count,
                sim.stats.total_births,
                sim.stats.total_deaths,
                step_time
            );
        }

        if matches!(step, 0 | 200 | 1000) || step == steps {
            snapshot_writer.write_blobs_snapshot(step, &sim)?;
            println!("Snapshot written for step {}", step);
        }

        if sim.is_empty() {
            println!("Warning: All blobs faded out at step {}", step);
            extinct_at = Some(step);
            break;
        }
    }

    let total_time = start_time.elapsed();
    println!("Simulation completed in {:?}", total_time);
    println!("Results written to {}", cli.out.display());

    if let (true, Some(step)) = (cli.strict, extinct_at) {
        anyhow::bail!("Population went extinct at step {} (strict mode).", step);
    }

    Ok(())
}
