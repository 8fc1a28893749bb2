//! Moving-target SIPP driver: intercept one target whose trajectory is
//! known, starting from the scenario source.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use intercept_cli::{cell_xy, init_tracing, plan_dir, write_plan};
use intercept_core::{load_scenarios, GridMap, TargetTrajectory, Time};
use intercept_search::MtSipp;

/// Intercept a moving target with moving-target SIPP.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The grid map file (MovingAI format).
    mapfile: PathBuf,
    /// The dynamic-scenario JSON file.
    scenfile: PathBuf,
    /// The target trajectory file, one `x y t` sample per line.
    trajectory: PathBuf,
    /// Time at which the agent becomes available.
    #[clap(long, default_value_t = 0)]
    start_time: Time,
    /// Where to write the plan file (defaults to
    /// `<scenario dir>/mt-sipp-res/<map kind>/`).
    #[clap(long)]
    out_dir: Option<PathBuf>,
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
    let trajectory = TargetTrajectory::load(&args.trajectory)
        .with_context(|| format!("loading trajectory {}", args.trajectory.display()))?;

    let out_dir = plan_dir(&args.scenfile, "mt-sipp", args.out_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let (sx, sy) = cell_xy(scen.source, map.width());
    let mut solver = MtSipp::new(&map, &scen.constraints);

    match solver.run(sx, sy, args.start_time, &trajectory) {
        Some(cost) => {
            let position = trajectory.position_at(cost);
            tracing::info!(
                source = scen.source,
                "intercepted at {position:?} with cost {cost}"
            );
            let path = solver.get_path();
            if !solver.validate(&path) {
                bail!("planned path violates constraints");
            }
            let plan_file = out_dir.join(format!("{}-mt-plan.txt", scen.source));
            write_plan(&plan_file, &path)
                .with_context(|| format!("writing {}", plan_file.display()))?;
        }
        None => {
            tracing::warn!(source = scen.source, "target cannot be intercepted");
        }
    }

    Ok(())
}
