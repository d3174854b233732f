use anyhow::{bail, Context, Result};
use cadrebuild_algo::{ReconstructConfig, SweepConvention};
use cadrebuild_core::model::Drawing2D;
use cadrebuild_core::scene::RecordingScene;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "cadrebuild")]
#[command(about = "Rebuilds a 3D wireframe from a three-view DXF drawing.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconstruct the wireframe and print the emitted primitives as JSON.
    Rebuild {
        input: PathBuf,
        #[arg(long, default_value_t = 5.0)]
        expand_distance: f64,
        #[arg(long, value_enum, default_value_t = SweepArg::Legacy)]
        sweep: SweepArg,
        /// Write primitives here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Cluster the sheet and assign views without reconstructing.
    Analyze {
        input: PathBuf,
        #[arg(long, default_value_t = 5.0)]
        expand_distance: f64,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Place every curve on the z=0 plane as-is.
    Import {
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SweepArg {
    Legacy,
    RightHanded,
}

impl From<SweepArg> for SweepConvention {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::Legacy => SweepConvention::Legacy,
            SweepArg::RightHanded => SweepConvention::RightHanded,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Rebuild {
            input,
            expand_distance,
            sweep,
            out,
            report,
        } => rebuild(
            &input,
            ReconstructConfig {
                expand_distance,
                sweep_convention: sweep.into(),
            },
            out.as_deref(),
            report.as_deref(),
        ),
        Command::Analyze {
            input,
            expand_distance,
            report,
        } => analyze(
            &input,
            ReconstructConfig {
                expand_distance,
                ..ReconstructConfig::default()
            },
            report.as_deref(),
        ),
        Command::Import { input, out } => import(&input, out.as_deref()),
    }
}

fn rebuild(
    input: &Path,
    cfg: ReconstructConfig,
    out: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let drawing = load_drawing(input)?;
    let mut scene = RecordingScene::new();
    let report_data = cadrebuild_algo::reconstruct_wireframe(&drawing, &cfg, &mut scene)
        .with_context(|| format!("reconstruct {input:?}"))?;

    log::info!(
        "{} primitives from {} confirmed edges",
        scene.primitives.len(),
        report_data.stats.confirmed_edges
    );
    write_json(&scene, out, "primitives")?;
    if let Some(path) = report {
        write_json(&report_data, Some(path), "report")?;
    }
    Ok(())
}

fn analyze(input: &Path, cfg: ReconstructConfig, report: Option<&Path>) -> Result<()> {
    let drawing = load_drawing(input)?;
    let report_data = cadrebuild_algo::analyze_views(&drawing, &cfg)?;
    write_json(&report_data, report, "report")
}

fn import(input: &Path, out: Option<&Path>) -> Result<()> {
    let drawing = load_drawing(input)?;
    let mut scene = RecordingScene::new();
    let report_data = cadrebuild_algo::lift_flat(&drawing, &mut scene);
    if report_data.stats.records_skipped > 0 {
        log::warn!("{} records skipped", report_data.stats.records_skipped);
    }
    write_json(&scene, out, "primitives")
}

fn load_drawing(input: &Path) -> Result<Drawing2D> {
    ensure_input_file(input)?;

    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "dxf" => cadrebuild_import_dxf::import_dxf(input),
        _ => bail!("Unsupported input extension: .{ext}"),
    }
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>, what: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value).with_context(|| format!("serialize {what}"))?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            std::fs::write(path, &json).with_context(|| format!("write {what}: {path:?}"))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            if let Some(root) = find_workspace_root(&cwd) {
                bail!(
                    "input not found: {input:?} (cwd: {cwd:?}).\nHint: run from the workspace root {root:?} or pass an absolute path."
                );
            }
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("Cargo.lock").is_file())
        .map(|dir| dir.to_path_buf())
}
