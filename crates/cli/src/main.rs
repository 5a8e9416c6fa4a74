//! Command line tool for exporting and slicing layered voxel models

mod cli;

// crate modules
use crate::cli::{Cli, Command, ModelArgs, OutputArgs, SectionArgs};

// layerview modules
use layerview_grid::reader::{
    open_with_fallback, ModelField, ModelReader, DEFAULT_MODEL_2D_FILE, DEFAULT_MODEL_FILE,
};
use layerview_grid::vtk::{ByteOrder, GridToVtk};
use layerview_grid::{write_vtk, AxisName};
use layerview_slicer::{AxisSlicer, Renderer, SliceMode, VtkFileRenderer};
use layerview_utils::f;

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// external crates
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_init(&cli)?;

    let mut reader = ModelReader::new();
    if cli.progress {
        reader.enable_progress();
    }

    match cli.command {
        Command::Model(args) => model(reader, args),
        Command::Model2d(args) => model_2d(reader, args),
        Command::Legacy(args) => legacy(reader, args),
    }
}

/// Clip a 3D model and write every resulting frame
fn model(mut reader: ModelReader, args: ModelArgs) -> Result<()> {
    reader.set_field(args.field);
    let (path, file) = open_model(args.file.as_deref(), DEFAULT_MODEL_FILE)?;
    let grid = reader
        .read(file)
        .with_context(|| f!("failed to read {}", path.display()))?;

    let mode = if args.cumulative {
        SliceMode::Cumulative
    } else {
        SliceMode::Independent
    };
    let mut slicer = AxisSlicer::builder(&grid).mode(mode).build();

    let clips = [(AxisName::X, args.x), (AxisName::Y, args.y), (AxisName::Z, args.z)]
        .into_iter()
        .filter_map(|(axis, value)| value.map(|v| (axis, v)))
        .collect::<Vec<(AxisName, f64)>>();

    let mut renderer = VtkFileRenderer::new(&args.output.output, args.output.format)
        .converter(converter(&args.output))
        .numbered(clips.len() > 1);

    if clips.is_empty() {
        renderer.redraw(&slicer.full_frame())?;
    }

    for (axis, value) in clips {
        info!("Clipping {axis} at {value}");
        slicer.update_and_redraw(axis, value, &mut renderer)?;
    }

    Ok(())
}

/// Write a 2D section as a grid one cell thick
fn model_2d(reader: ModelReader, args: SectionArgs) -> Result<()> {
    let (path, file) = open_model(args.file.as_deref(), DEFAULT_MODEL_2D_FILE)?;
    let grid = reader
        .read_2d(file)
        .with_context(|| f!("failed to read {}", path.display()))?;

    let vtk = converter(&args.output).convert_2d(&grid);
    write_vtk(vtk, &args.output.output, args.output.format)?;
    Ok(())
}

/// Write the raw model values without any reordering for the viewer
fn legacy(mut reader: ModelReader, args: SectionArgs) -> Result<()> {
    reader.set_field(ModelField::Model);
    let (path, file) = open_model(args.file.as_deref(), DEFAULT_MODEL_FILE)?;
    let grid = reader
        .read(file)
        .with_context(|| f!("failed to read {}", path.display()))?;

    let vtk = converter(&args.output).convert(&grid);
    write_vtk(vtk, &args.output.output, args.output.format)?;
    Ok(())
}

/// Open an explicit path, or look for the default name with fallback
fn open_model(file: Option<&Path>, default: &str) -> Result<(PathBuf, BufReader<File>)> {
    let (path, file) = match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| f!("failed to open {}", path.display()))?;
            (path.to_path_buf(), file)
        }
        None => open_with_fallback(default)
            .with_context(|| f!("could not find {default} in ../ or ./"))?,
    };

    info!("Loading {}", path.display());
    Ok((path, BufReader::new(file)))
}

fn converter(output: &OutputArgs) -> GridToVtk {
    let byte_order = if output.little_endian {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };
    GridToVtk::builder().byte_order(byte_order).build()
}

/// Sets up logging at runtime to allow for multiple verbosity levels
fn logging_init(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .module(module_path!())
        .module("layerview_grid")
        .module("layerview_slicer")
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .context("failed to initialise logging")
}
