//! Layered voxel models and file parsing
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod axis;
mod error;
mod grid;

pub mod reader;
pub mod vtk;

// inline important the model-related modules for a nice public API
#[doc(inline)]
pub use reader::{read_model, read_model_2d, read_model_2d_from, read_model_from};

#[doc(inline)]
pub use axis::{Axis, AxisName};

#[doc(inline)]
pub use grid::{Grid2D, VoxelGrid};

#[doc(inline)]
pub use vtk::{grid_2d_to_vtk, grid_to_vtk, write_vtk};

#[doc(inline)]
pub use error::{Error, Result};
