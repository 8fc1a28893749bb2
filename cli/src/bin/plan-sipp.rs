//! SIPP driver: same surface as the space-time A* driver, but searching
//! over safe intervals.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use intercept_cli::{cell_xy, init_tracing, plan_dir, write_plan};
use intercept_core::{load_scenarios, GridMap};
use intercept_search::Sipp;

/// Plan time-indexed paths through dynamic obstacles with SIPP.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The grid map file (MovingAI format).
    mapfile: PathBuf,
    /// The dynamic-scenario JSON file.
    scenfile: PathBuf,
    /// Where to write the plan files (defaults to
    /// `<scenario dir>/sipp-res/<map kind>/`).
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

    let out_dir = plan_dir(&args.scenfile, "sipp", args.out_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let (sx, sy) = cell_xy(scen.source, map.width());
    let mut solver = Sipp::new(&map, &scen.constraints);

    for &target in &scen.target_set {
        let (gx, gy) = cell_xy(target, map.width());
        match solver.run(sx, sy, gx, gy) {
            Some(cost) => {
                tracing::info!(
                    source = scen.source,
                    goal = target,
                    "({sx}, {sy}) to ({gx}, {gy}): cost {cost}"
                );
                let path = solver.get_path();
                if !solver.validate(&path) {
                    bail!("planned path violates constraints for target {target}");
                }
                let plan_file = out_dir.join(format!("{}-{}-plan.txt", scen.source, target));
                write_plan(&plan_file, &path)
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
