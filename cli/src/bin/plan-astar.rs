//! Spatial A* driver: plans a static shortest path from the scenario
//! source to every target cell and writes one plan file per pair.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use intercept_cli::{cell_xy, init_tracing, plan_dir, write_spatial_plan};
use intercept_core::{load_scenarios, GridMap};
use intercept_search::AStar;

/// Plan 8-connected shortest paths on a static grid map.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The grid map file (MovingAI format).
    mapfile: PathBuf,
    /// The dynamic-scenario JSON file; constraints are ignored by this
    /// solver, only source and targets are used.
    scenfile: PathBuf,
    /// Where to write the plan files (defaults to
    /// `<scenario dir>/astar-res/<map kind>/`).
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

    let out_dir = plan_dir(&args.scenfile, "astar", args.out_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let (sx, sy) = cell_xy(scen.source, map.width());
    let mut solver = AStar::new(&map);

    for &target in &scen.target_set {
        let (gx, gy) = cell_xy(target, map.width());
        match solver.run(sx, sy, gx, gy) {
            Some(distance) => {
                tracing::info!(
                    source = scen.source,
                    goal = target,
                    "({sx}, {sy}) to ({gx}, {gy}): distance {distance:.4}"
                );
                let plan_file = out_dir.join(format!("{}-{}-plan.txt", scen.source, target));
                write_spatial_plan(&plan_file, &solver.get_path())
                    .with_context(|| format!("writing {}", plan_file.display()))?;
            }
            None => {
                tracing::warn!(
                    source = scen.source,
                    goal = target,
                    "({sx}, {sy}) to ({gx}, {gy}): unreachable"
                );
            }
        }
    }

    Ok(())
}
