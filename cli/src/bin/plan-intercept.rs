//! Multi-target interception driver: loads every trajectory in a
//! directory and plans the optimal visiting order.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use intercept_cli::{cell_xy, init_tracing, plan_dir, write_plan};
use intercept_core::{load_scenarios, GridMap, TargetTrajectory, Time};
use intercept_search::MultiTargetInterceptor;

/// Intercept a set of moving targets in time-optimal order.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The grid map file (MovingAI format).
    mapfile: PathBuf,
    /// The dynamic-scenario JSON file.
    scenfile: PathBuf,
    /// Directory of trajectory files, one target each, read in name order.
    trackers_dir: PathBuf,
    /// Time at which the agent becomes available.
    #[clap(long, default_value_t = 0)]
    start_time: Time,
    /// Where to write the plan file (defaults to
    /// `<scenario dir>/intercept-res/<map kind>/`).
    #[clap(long)]
    out_dir: Option<PathBuf>,
}

fn load_trackers(dir: &PathBuf) -> Result<Vec<TargetTrajectory>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading trackers directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    files
        .iter()
        .map(|path| {
            TargetTrajectory::load(path)
                .with_context(|| format!("loading trajectory {}", path.display()))
        })
        .collect()
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let map = GridMap::load(&args.mapfile)
        .with_context(|| format!("loading map {}", args.mapfile.display()))?;
    let scenarios = load_scenarios(&args.scenfile)
        .with_context(|| format!("loading scenarios {}", args.scenfile.display()))?;
    let Some(scen) = scenarios.first() else {
        bail!("no scenarios in {}", args.scenfile.display());
    };
    let trackers = load_trackers(&args.trackers_dir)?;
    tracing::info!("loaded {} target trajectories", trackers.len());

    let out_dir = plan_dir(&args.scenfile, "intercept", args.out_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let (sx, sy) = cell_xy(scen.source, map.width());
    let mut interceptor = MultiTargetInterceptor::new(&map, &scen.constraints, &trackers);

    match interceptor.run(sx, sy, args.start_time) {
        Some(plan) => {
            tracing::info!(total_time = plan.total_time, "interception succeeded");
            for (target, event) in plan.order.iter().zip(plan.events.iter()) {
                tracing::info!(
                    "intercepted target {target} at ({}, {}) at time {}",
                    event.x,
                    event.y,
                    event.t
                );
            }
            let plan_file = out_dir.join(format!("{}-intercept-plan.txt", scen.source));
            write_plan(&plan_file, &plan.full_path)
                .with_context(|| format!("writing {}", plan_file.display()))?;
        }
        None => {
            tracing::error!("no sequence intercepts every target");
        }
    }

    Ok(())
}
