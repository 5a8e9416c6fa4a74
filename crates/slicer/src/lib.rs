//! Interactive axis slicing of layered voxel models
#![doc = include_str!("../readme.md")]

mod error;
mod render;
mod slicer;

#[doc(inline)]
pub use crate::slicer::{AxisSlicer, AxisSlicerBuilder, SliceBounds, SliceMode};

#[doc(inline)]
pub use crate::render::{RenderFrame, Renderer, VtkFileRenderer};

#[doc(inline)]
pub use crate::error::{Error, Result};
