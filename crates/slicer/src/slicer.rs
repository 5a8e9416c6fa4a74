//! Module for clipping a model along its axes

// crate modules
use crate::error::Result;
use crate::render::{RenderFrame, Renderer};

// layerview modules
use layerview_grid::{Axis, AxisName, VoxelGrid};

// external crates
use log::{debug, info, trace};
use ndarray::{s, Array3};

/// How each update combines with the bounds already set on other axes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SliceMode {
    /// Only the updated axis is truncated, the others are shown in full
    #[default]
    Independent,
    /// Every stored bound is applied on every update
    Cumulative,
}

/// Number of cells kept along each dimension
///
/// Every bound is in `1..=extent` for its dimension, so a frame is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBounds {
    /// Cells kept along x
    pub x: usize,
    /// Cells kept along y
    pub y: usize,
    /// Cells kept along z
    pub z: usize,
}

impl SliceBounds {
    /// Bound for a named axis
    pub fn get(&self, axis: AxisName) -> usize {
        match axis {
            AxisName::X => self.x,
            AxisName::Y => self.y,
            AxisName::Z => self.z,
        }
    }

    fn set(&mut self, axis: AxisName, index: usize) {
        match axis {
            AxisName::X => self.x = index,
            AxisName::Y => self.y = index,
            AxisName::Z => self.z = index,
        }
    }
}

impl From<[usize; 3]> for SliceBounds {
    fn from(shape: [usize; 3]) -> Self {
        Self {
            x: shape[0],
            y: shape[1],
            z: shape[2],
        }
    }
}

/// Clip a model along one axis at a time
///
/// The slicer keeps its own copy of the model in render order (see
/// [VoxelGrid::reorder_zyx_inverted]) and never modifies it. Every update
/// derives a fresh frame from that full resolution copy, so repeated updates
/// with the same value give identical frames.
///
/// A physical coordinate is turned into a number of cells to keep with
/// [Axis::find_truncation_index], and the render order grid is cut to
/// `[0, index)` along that dimension. Axes that store cell edges are one longer
/// than the grid, so the index is capped at the grid extent.
///
/// ```rust
/// # use layerview_grid::{Axis, AxisName, VoxelGrid};
/// # use layerview_slicer::AxisSlicer;
/// # use ndarray::Array3;
/// let grid = VoxelGrid::new(
///     Array3::from_elem((4, 2, 4), 1),
///     Axis::from(vec![10.0, 20.0, 30.0, 40.0]),
///     Axis::from(vec![0.0, 1.0]),
///     Axis::from(vec![10.0, 20.0, 30.0, 40.0]),
/// )
/// .unwrap();
///
/// let mut slicer = AxisSlicer::new(&grid);
/// let frame = slicer.update(AxisName::Z, 25.0).unwrap();
/// assert_eq!(frame.shape, [4, 2, 2]);
///
/// // z is remembered, but only x is cut in the next frame
/// let frame = slicer.update_named("x_axis", 30.0).unwrap();
/// assert_eq!(frame.shape, [3, 2, 4]);
/// assert_eq!(slicer.bounds().z, 2);
/// ```
#[derive(Debug, Clone)]
pub struct AxisSlicer {
    /// Full resolution values in `[z][y][x]` order, top layer first
    render: Array3<i32>,
    /// The x, y, z coordinate axes
    axes: [Axis; 3],
    /// Last set bound for each axis
    bounds: SliceBounds,
    /// How bounds combine between updates
    mode: SliceMode,
}

/// Builder for [AxisSlicer] configuration
///
/// ```rust
/// # use layerview_grid::{Axis, VoxelGrid};
/// # use layerview_slicer::{AxisSlicer, SliceMode};
/// # use ndarray::Array3;
/// # let axis = || Axis::from(vec![0.0, 1.0]);
/// # let grid = VoxelGrid::new(Array3::zeros((2, 2, 2)), axis(), axis(), axis()).unwrap();
/// let slicer = AxisSlicer::builder(&grid)
///     .mode(SliceMode::Cumulative)
///     .build();
/// assert_eq!(slicer.mode(), SliceMode::Cumulative);
/// ```
#[derive(Debug)]
pub struct AxisSlicerBuilder<'a> {
    grid: &'a VoxelGrid,
    mode: SliceMode,
}

impl<'a> AxisSlicerBuilder<'a> {
    /// Set how bounds combine between updates
    pub fn mode(mut self, mode: SliceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the [AxisSlicer], copying the grid into render order
    pub fn build(self) -> AxisSlicer {
        let render = self.grid.reorder_zyx_inverted();
        info!("JSON restructured");

        AxisSlicer {
            render,
            axes: AxisName::ALL.map(|name| self.grid.axis(name).clone()),
            bounds: SliceBounds::from(self.grid.shape()),
            mode: self.mode,
        }
    }
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl AxisSlicer {
    /// Slicer with the default [SliceMode::Independent] behaviour
    pub fn new(grid: &VoxelGrid) -> Self {
        Self::builder(grid).build()
    }

    /// Get an instance of the [AxisSlicerBuilder]
    pub fn builder(grid: &VoxelGrid) -> AxisSlicerBuilder<'_> {
        AxisSlicerBuilder {
            grid,
            mode: SliceMode::default(),
        }
    }

    /// Current slicing mode
    pub fn mode(&self) -> SliceMode {
        self.mode
    }

    /// Full grid extents as `[x, y, z]`
    pub fn shape(&self) -> [usize; 3] {
        let (nz, ny, nx) = self.render.dim();
        [nx, ny, nz]
    }

    /// Coordinate axis for a named dimension
    pub fn axis(&self, name: AxisName) -> &Axis {
        &self.axes[Self::position(name)]
    }

    /// Last set bound for each axis
    pub fn bounds(&self) -> SliceBounds {
        self.bounds
    }

    /// Forget all bounds, going back to the full extent
    pub fn reset(&mut self) {
        self.bounds = SliceBounds::from(self.shape());
    }

    /// Cut the model along `axis` at the physical coordinate `value`
    ///
    /// Stores the new bound for `axis` and leaves the others as they were.
    /// Values outside the axis saturate to the first or last cell.
    pub fn update(&mut self, axis: AxisName, value: f64) -> Result<RenderFrame> {
        let index = self.truncation_index(axis, value)?;
        debug!("{axis} = {value}: keeping {index} cells");
        self.bounds.set(axis, index);

        let bounds = match self.mode {
            SliceMode::Independent => {
                let mut bounds = SliceBounds::from(self.shape());
                bounds.set(axis, index);
                bounds
            }
            SliceMode::Cumulative => self.bounds,
        };

        Ok(self.frame(bounds))
    }

    /// Same as [AxisSlicer::update], with the axis given by name
    ///
    /// Accepts `"x"`, `"X"`, `"x_axis"` and so on.
    pub fn update_named(&mut self, axis: &str, value: f64) -> Result<RenderFrame> {
        let axis = axis.parse::<AxisName>()?;
        self.update(axis, value)
    }

    /// Update, then hand the new frame to a renderer
    pub fn update_and_redraw<R: Renderer + ?Sized>(
        &mut self,
        axis: AxisName,
        value: f64,
        renderer: &mut R,
    ) -> Result<()> {
        let frame = self.update(axis, value)?;
        renderer.redraw(&frame)
    }

    /// Frame with every stored bound applied
    pub fn current_frame(&self) -> RenderFrame {
        self.frame(self.bounds)
    }

    /// Frame of the whole model
    pub fn full_frame(&self) -> RenderFrame {
        self.frame(SliceBounds::from(self.shape()))
    }
}

// ! ------------------------------------------------------------------------
// !                              Implementation
// ! ------------------------------------------------------------------------

impl AxisSlicer {
    fn position(name: AxisName) -> usize {
        match name {
            AxisName::X => 0,
            AxisName::Y => 1,
            AxisName::Z => 2,
        }
    }

    fn truncation_index(&self, axis: AxisName, value: f64) -> Result<usize> {
        let extent = self.shape()[Self::position(axis)];
        let index = self.axis(axis).find_truncation_index(value)?;
        Ok(index.min(extent))
    }

    fn frame(&self, bounds: SliceBounds) -> RenderFrame {
        let view = self.render.slice(s![..bounds.z, ..bounds.y, ..bounds.x]);
        let values = view.iter().copied().collect::<Vec<i32>>();
        trace!("frame of {} cells", values.len());

        RenderFrame {
            shape: [bounds.x, bounds.y, bounds.z],
            values,
            bounds: self
                .axes
                .each_ref()
                .map(|axis| axis.bounds().unwrap_or_default()),
        }
    }
}
