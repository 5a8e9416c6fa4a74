//! Module for dense mask grids and their renderer orderings

// crate modules
use crate::axis::{Axis, AxisName};
use crate::error::{Error, Result};

// layerview modules
use layerview_utils::f;

// external crates
use ndarray::{Array2, Array3};

/// Dense three-dimensional grid of integer mask labels
///
/// Values are stored in source order, indexed `[x][y][z]` exactly as they
/// appear in the model file. The cell at `(i, j, k)` sits at the physical
/// coordinate `(x[i], y[j], z[k])`.
///
/// Renderers generally want a different ordering, so several copies in other
/// orders are available. None of them alias the source data:
///
/// - [VoxelGrid::reorder_zyx_inverted] for the interactive viewer, with the top
///   of the model first
/// - [VoxelGrid::to_zyx] and [VoxelGrid::flatten_zyx] for a plain `[z][y][x]`
///   layout where x varies fastest
///
/// ```rust
/// # use layerview_grid::{Axis, VoxelGrid};
/// # use ndarray::Array3;
/// let values = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as i32);
/// let grid = VoxelGrid::new(
///     values,
///     Axis::from(vec![0.0, 1.0]),
///     Axis::from(vec![0.0, 1.0, 2.0]),
///     Axis::from(vec![0.0, 1.0, 2.0, 3.0]),
/// )
/// .unwrap();
///
/// assert_eq!(grid.shape(), [2, 3, 4]);
/// assert_eq!(grid.get(1, 2, 3), Some(123));
///
/// // top layer first, x varies fastest
/// let render = grid.reorder_zyx_inverted();
/// assert_eq!(render[[0, 2, 1]], 123);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    values: Array3<i32>,
    x: Axis,
    y: Axis,
    z: Axis,
}

impl VoxelGrid {
    /// Build a grid from `[x][y][z]` values and the three coordinate axes
    ///
    /// Fails for an empty grid, or if any axis is neither the same length as
    /// its dimension nor one longer.
    pub fn new(values: Array3<i32>, x: Axis, y: Axis, z: Axis) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyModel);
        }

        let (nx, ny, nz) = values.dim();
        x.check_extent(AxisName::X, nx)?;
        y.check_extent(AxisName::Y, ny)?;
        z.check_extent(AxisName::Z, nz)?;

        Ok(Self { values, x, y, z })
    }

    /// Full resolution values in `[x][y][z]` order
    pub fn values(&self) -> &Array3<i32> {
        &self.values
    }

    /// Grid extents as `[x, y, z]`
    pub fn shape(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.values.dim();
        [nx, ny, nz]
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a successfully constructed grid
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mask value at source index `(i, j, k)`
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<i32> {
        self.values.get((i, j, k)).copied()
    }

    /// Coordinate axis for a named dimension
    pub fn axis(&self, name: AxisName) -> &Axis {
        match name {
            AxisName::X => &self.x,
            AxisName::Y => &self.y,
            AxisName::Z => &self.z,
        }
    }

    /// Consume the grid, returning values and the x, y, z axes
    pub fn into_parts(self) -> (Array3<i32>, Axis, Axis, Axis) {
        (self.values, self.x, self.y, self.z)
    }

    /// Copy into `[z][y][x]` order with the z dimension reversed
    ///
    /// For every valid `(i, j, k)`:
    ///
    /// ```text
    ///     output[nz - 1 - k][j][i] == input[i][j][k]
    /// ```
    ///
    /// Index 0 of the output is therefore the highest source z layer, which
    /// puts the top of the model first for renderers that draw downwards.
    pub fn reorder_zyx_inverted(&self) -> Array3<i32> {
        let (nx, ny, nz) = self.values.dim();
        Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| self.values[[i, j, nz - 1 - k]])
    }

    /// Copy into `[z][y][x]` order without any inversion
    pub fn to_zyx(&self) -> Array3<i32> {
        self.values.view().reversed_axes().to_owned()
    }

    /// Flatten with x varying fastest, then y, then z
    ///
    /// Element `n` of the output is the source cell
    ///
    /// ```text
    ///     [n % nx][(n % (nx * ny)) / nx][n / (nx * ny)]
    /// ```
    pub fn flatten_zyx(&self) -> Vec<i32> {
        self.values.view().reversed_axes().iter().copied().collect()
    }
}

impl std::fmt::Display for VoxelGrid {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [nx, ny, nz] = self.shape();
        let mut s = "VoxelGrid {\n".to_string();
        s += &f!("    voxels: {} ({nx}x{ny}x{nz})\n", self.len());
        s += &f!("    x: {}\n", self.x);
        s += &f!("    y: {}\n", self.y);
        s += &f!("    z: {}\n}}", self.z);
        write!(fmt, "{s}")
    }
}

/// Dense two-dimensional grid of integer mask labels
///
/// Produced by the 2D model variant, which is a single vertical section through
/// a model. Values are stored in source order `[x][z]`.
///
/// ```rust
/// # use layerview_grid::{Axis, Grid2D};
/// # use ndarray::array;
/// let grid = Grid2D::new(
///     array![[1, 2, 3], [4, 5, 6]],
///     Axis::from(vec![0.0, 10.0]),
///     Axis::from(vec![0.0, 1.0, 2.0]),
/// )
/// .unwrap();
///
/// // image ordering has depth as the rows
/// assert_eq!(grid.transpose(), array![[1, 4], [2, 5], [3, 6]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    values: Array2<i32>,
    x: Axis,
    z: Axis,
}

impl Grid2D {
    /// Build a grid from `[x][z]` values and the two coordinate axes
    pub fn new(values: Array2<i32>, x: Axis, z: Axis) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyModel);
        }

        let (nx, nz) = values.dim();
        x.check_extent(AxisName::X, nx)?;
        z.check_extent(AxisName::Z, nz)?;

        Ok(Self { values, x, z })
    }

    /// Full resolution values in `[x][z]` order
    pub fn values(&self) -> &Array2<i32> {
        &self.values
    }

    /// Grid extents as `[x, z]`
    pub fn shape(&self) -> [usize; 2] {
        let (nx, nz) = self.values.dim();
        [nx, nz]
    }

    /// Mask value at source index `(i, k)`
    pub fn get(&self, i: usize, k: usize) -> Option<i32> {
        self.values.get((i, k)).copied()
    }

    /// Coordinate axis for a named dimension, there is no y in a section
    pub fn axis(&self, name: AxisName) -> Option<&Axis> {
        match name {
            AxisName::X => Some(&self.x),
            AxisName::Y => None,
            AxisName::Z => Some(&self.z),
        }
    }

    /// Copy into `[z][x]` image order
    pub fn transpose(&self) -> Array2<i32> {
        self.values.t().to_owned()
    }
}

impl std::fmt::Display for Grid2D {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [nx, nz] = self.shape();
        write!(
            fmt,
            "Grid2D {{\n    cells: {} ({nx}x{nz})\n    x: {}\n    z: {}\n}}",
            self.values.len(),
            self.x,
            self.z
        )
    }
}
