//! camber CLI - mesh import and toolpath slicing from the terminal.
//!
//! The two user actions of the simulator — load a mesh, generate a
//! toolpath — as subcommands, plus export of the flat buffers the
//! rendering collaborator consumes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use camber_mesh::Triangulation;
use camber_slicer::SliceSettings;

#[derive(Parser)]
#[command(name = "camber")]
#[command(about = "Toolpath contour simulator for triangulated meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a mesh and print a summary
    Info {
        /// Input OBJ file
        file: PathBuf,
    },
    /// Import a mesh and generate toolpath contours
    Slice {
        /// Input OBJ file
        file: PathBuf,
        /// Height of the highest slicing plane
        #[arg(long, default_value_t = 20.0)]
        top: f64,
        /// Height of the lowest slicing plane
        #[arg(long, default_value_t = -20.0)]
        bottom: f64,
        /// Vertical distance between levels
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Emit renderer line buffers instead of layer contours
        #[arg(long)]
        buffers: bool,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export renderer buffers for a mesh
    Buffers {
        /// Input OBJ file
        file: PathBuf,
        /// Which buffers to export
        #[arg(long, value_enum, default_value = "mesh")]
        kind: BufferKind,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Renderer buffer variants exportable without slicing.
#[derive(Clone, Copy, ValueEnum)]
enum BufferKind {
    /// Triangle buffers with per-vertex face normals
    Mesh,
    /// The 12 bounding-box edges as line pairs
    Box,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => show_info(&file),
        Commands::Slice {
            file,
            top,
            bottom,
            step,
            buffers,
            output,
        } => run_slice(&file, top, bottom, step, buffers, output.as_deref()),
        Commands::Buffers { file, kind, output } => {
            export_buffers(&file, kind, output.as_deref())
        }
    }
}

fn import(file: &Path) -> Result<Triangulation> {
    camber_obj::read_obj(file).with_context(|| format!("failed to import {}", file.display()))
}

fn show_info(file: &Path) -> Result<()> {
    let mesh = import(file)?;
    println!("Triangles:    {}", mesh.num_triangles());
    println!("Pool entries: {}", mesh.pool.len());
    let b = mesh.bounding_box;
    if b.is_empty() {
        println!("Bounds:       (empty)");
    } else {
        println!(
            "Bounds:       ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            b.low.x, b.low.y, b.low.z, b.high.x, b.high.y, b.high.z
        );
    }
    Ok(())
}

fn run_slice(
    file: &Path,
    top: f64,
    bottom: f64,
    step: f64,
    buffers: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mesh = import(file)?;
    let result = camber_slicer::slice_with_stats(&mesh, top, bottom, &SliceSettings { step })?;

    eprintln!(
        "{} layers, {} polylines",
        result.stats.layer_count, result.stats.polyline_count
    );
    if result.stats.degenerate_triangles > 0 {
        eprintln!(
            "warning: skipped {} degenerate triangles",
            result.stats.degenerate_triangles
        );
    }

    let json = if buffers {
        serde_json::to_string_pretty(&camber_render::polyline_buffers(&result.layers))?
    } else {
        serde_json::to_string_pretty(&result.layers)?
    };
    write_output(output, &json)
}

fn export_buffers(file: &Path, kind: BufferKind, output: Option<&Path>) -> Result<()> {
    let mesh = import(file)?;
    let data = match kind {
        BufferKind::Mesh => camber_render::triangulation_buffers(&mesh),
        BufferKind::Box => camber_render::bounding_box_buffers(&mesh),
    };
    write_output(output, &serde_json::to_string_pretty(&data)?)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, json)
            .with_context(|| format!("failed to write {}", p.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
