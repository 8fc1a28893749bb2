//! Shared plumbing for the planner driver binaries: tracing setup, output
//! directory derivation and plan-file writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use intercept_search::PathState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for a driver binary; `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Map family a scenario file belongs to, judged by its file stem.
pub fn map_kind(scen_path: &Path) -> &'static str {
    let stem = scen_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    for kind in ["empty", "maze", "random", "warehouse"] {
        if stem.starts_with(kind) {
            return kind;
        }
    }
    "unknown"
}

/// Directory the plan files of one solver run go to:
/// `<scenario dir>/<solver>-res/<map kind>/`, unless overridden.
pub fn plan_dir(scen_path: &Path, solver: &str, override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    let scen_dir = scen_path.parent().unwrap_or_else(|| Path::new("."));
    scen_dir
        .join(format!("{solver}-res"))
        .join(map_kind(scen_path))
}

/// The (x, y) coordinates of a row-major cell id.
pub fn cell_xy(cell: u32, width: i32) -> (i32, i32) {
    (cell as i32 % width, cell as i32 / width)
}

/// Write a space-time plan, one `x y t` sample per line, making the waits
/// between non-adjacent samples explicit.
pub fn write_plan(path: &Path, plan: &[PathState]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    let Some(first) = plan.first() else {
        return Ok(());
    };
    writeln!(out, "{} {} {}", first.x, first.y, first.t)?;

    for window in plan.windows(2) {
        let (prev, current) = (window[0], window[1]);
        for wait_t in prev.t + 1..current.t {
            writeln!(out, "{} {} {}", prev.x, prev.y, wait_t)?;
        }
        writeln!(out, "{} {} {}", current.x, current.y, current.t)?;
    }
    out.flush()
}

/// Write a spatial plan, one `x y` cell per line.
pub fn write_spatial_plan(path: &Path, plan: &[(i32, i32)]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (x, y) in plan {
        writeln!(out, "{x} {y}")?;
    }
    out.flush()
}
