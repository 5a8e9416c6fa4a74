//! Conversion of mask grids to VTK formats for plotting
//!
//! Grids are written as VTK ImageData in index space. Every cell is one voxel
//! of unit size by default, which matches how the interactive viewer draws the
//! model, and the physical axes are left for labelling.
//!
//! ```rust, no_run
//! # use layerview_grid::{read_model, write_vtk, grid_to_vtk};
//! # use layerview_grid::vtk::VtkFormat;
//! let grid = read_model("my_model.json").unwrap();
//! let vtk = grid_to_vtk(&grid);
//! write_vtk(vtk, "my_model", VtkFormat::Xml).unwrap();
//! ```

mod builder;
mod convert;

#[doc(inline)]
pub use builder::GridToVtkBuilder;
#[doc(inline)]
pub use convert::GridToVtk;

// re-export the vtkio types needed for configuration
pub use vtkio::model::ByteOrder;
pub use vtkio::Vtk;

// crate modules
use crate::error::Result;
use crate::grid::{Grid2D, VoxelGrid};

// standard library
use std::path::{Path, PathBuf};

// external crates
use log::info;

/// Available VTK output formats
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VtkFormat {
    /// Modern XML ImageData, written with a `.vti` extension
    #[default]
    Xml,
    /// Legacy text format, written with a `.vtk` extension
    LegacyAscii,
    /// Legacy binary format, written with a `.vtk` extension
    LegacyBinary,
}

impl VtkFormat {
    /// File extension expected by viewers for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Xml => "vti",
            Self::LegacyAscii | Self::LegacyBinary => "vtk",
        }
    }
}

/// Convert a 3D grid with the default configuration
pub fn grid_to_vtk(grid: &VoxelGrid) -> Vtk {
    GridToVtk::default().convert(grid)
}

/// Convert a 2D section with the default configuration
pub fn grid_2d_to_vtk(grid: &Grid2D) -> Vtk {
    GridToVtk::default().convert_2d(grid)
}

/// Write a [Vtk] to `path` in the chosen format
///
/// The extension of `path` is replaced to match the format, and the path that
/// was actually written is returned. Legacy binary files follow the byte order
/// set on the [Vtk].
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<PathBuf> {
    let path = path.as_ref().with_extension(format.extension());
    let byte_order = vtk.byte_order;
    info!("Writing {}", path.display());

    match format {
        VtkFormat::Xml => vtk.export(&path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(&path)?,
        VtkFormat::LegacyBinary => match byte_order {
            ByteOrder::BigEndian => vtk.export_be(&path)?,
            ByteOrder::LittleEndian => vtk.export_le(&path)?,
        },
    }

    Ok(path)
}
