// standard library
use std::ops::RangeInclusive;

// crate modules
use crate::error::{Error, Result};
use crate::grid::{Grid2D, VoxelGrid};
use crate::vtk::GridToVtkBuilder;

// external crates
use log::trace;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, DataArray, DataSet, ElementType, Extent, IOBuffer,
    ImageDataPiece, Piece, RangeExtent, Version, Vtk,
};

/// Convert mask grids to VTK ImageData for plotting
///
/// Cells are written with x varying fastest, then y, then z, which is the
/// ordering VTK expects for structured cell data. A 2D section is written as a
/// grid one cell thick in y.
///
/// The fields remain public for direct use, but for convenience and style
/// preference a builder pattern is also implemented and recommended.
///
/// ```rust
/// # use layerview_grid::vtk::GridToVtk;
/// # use vtkio::model::ByteOrder;
/// // Scale voxels to 25 m x 25 m x 5 m
/// let converter = GridToVtk::builder()
///     .spacing([25.0, 25.0, 5.0])
///     .byte_order(ByteOrder::LittleEndian)
///     .array_name("layer")
///     .build();
/// ```
///
/// Note that the byte ordering matters for binary file compatability with
/// plotting software. ParaView does not care, but VisIt only reads big endian,
/// so this is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct GridToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Name of the cell data array
    pub array_name: String,
    /// Position of the first grid point
    pub origin: [f32; 3],
    /// Size of a voxel along x, y, z
    pub spacing: [f32; 3],
    /// Title written to the file header
    pub title: String,
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl GridToVtk {
    /// Start with the default configuration
    pub fn new() -> GridToVtk {
        Default::default()
    }

    /// Get an instance of the [GridToVtkBuilder]
    pub fn builder() -> GridToVtkBuilder {
        GridToVtkBuilder::default()
    }

    /// Convert a [VoxelGrid] in source orientation
    pub fn convert(&self, grid: &VoxelGrid) -> Vtk {
        self.image_data(grid.shape(), grid.flatten_zyx())
    }

    /// Convert a [Grid2D] section into a grid one cell thick in y
    pub fn convert_2d(&self, grid: &Grid2D) -> Vtk {
        let [nx, nz] = grid.shape();
        let values = grid.transpose().iter().copied().collect();
        self.image_data([nx, 1, nz], values)
    }

    /// Convert flat cell values for a grid of `[x, y, z]` cells
    ///
    /// Values must be ordered with x varying fastest, and there must be exactly
    /// one per cell.
    ///
    /// ```rust
    /// # use layerview_grid::vtk::GridToVtk;
    /// let converter = GridToVtk::new();
    /// assert!(converter.convert_cells([2, 1, 1], vec![1, 2]).is_ok());
    /// assert!(converter.convert_cells([2, 2, 1], vec![1, 2]).is_err());
    /// ```
    pub fn convert_cells(&self, shape: [usize; 3], values: Vec<i32>) -> Result<Vtk> {
        let expected = shape.iter().product::<usize>();
        if values.len() != expected {
            return Err(Error::InconsistentLength {
                field: self.array_name.clone(),
                expected,
                found: values.len(),
            });
        }
        Ok(self.image_data(shape, values))
    }
}

impl Default for GridToVtk {
    fn default() -> Self {
        GridToVtkBuilder::default().build()
    }
}

// ! ------------------------------------------------------------------------
// !                              Implementation
// ! ------------------------------------------------------------------------

impl GridToVtk {
    fn image_data(&self, shape: [usize; 3], values: Vec<i32>) -> Vtk {
        trace!("ImageData with {} cells {shape:?}", values.len());
        let extent = Self::extent(shape);

        Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::ImageData {
                extent: extent.clone(),
                origin: self.origin,
                spacing: self.spacing,
                meta: None,
                pieces: vec![Piece::Inline(Box::new(ImageDataPiece {
                    extent,
                    data: self.attributes(values),
                }))],
            },
        }
    }

    /// Point index ranges, one more point than cells along each dimension
    fn extent(shape: [usize; 3]) -> Extent {
        let range_ext: RangeExtent = [
            RangeInclusive::new(0, shape[0] as i32),
            RangeInclusive::new(0, shape[1] as i32),
            RangeInclusive::new(0, shape[2] as i32),
        ];
        Extent::Ranges(range_ext)
    }

    fn attributes(&self, values: Vec<i32>) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.cell.push(Attribute::DataArray(DataArray {
            name: self.array_name.clone(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::I32(values),
        }));
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use ndarray::{array, Array3};

    fn cell_values(vtk: &Vtk) -> (Extent, Vec<i32>) {
        match &vtk.data {
            DataSet::ImageData { extent, pieces, .. } => match &pieces[0] {
                Piece::Inline(piece) => match &piece.data.cell[0] {
                    Attribute::DataArray(array) => match &array.data {
                        IOBuffer::I32(v) => (extent.clone(), v.clone()),
                        _ => panic!("expected i32 cell data"),
                    },
                    _ => panic!("expected a data array"),
                },
                _ => panic!("expected an inline piece"),
            },
            _ => panic!("expected image data"),
        }
    }

    #[test]
    fn grid_cells_are_x_fastest() {
        let values = Array3::from_shape_fn((2, 2, 2), |(i, j, k)| (i + 10 * j + 100 * k) as i32);
        let axis = || Axis::from(vec![0.0, 1.0]);
        let grid = VoxelGrid::new(values, axis(), axis(), axis()).unwrap();

        let (extent, cells) = cell_values(&GridToVtk::new().convert(&grid));
        assert_eq!(cells, vec![0, 1, 10, 11, 100, 101, 110, 111]);
        assert_eq!(extent, Extent::Ranges([0..=2, 0..=2, 0..=2]));
    }

    #[test]
    fn section_is_one_cell_thick() {
        let grid = Grid2D::new(
            array![[1, 2, 3], [4, 5, 6]],
            Axis::from(vec![0.0, 1.0]),
            Axis::from(vec![0.0, 1.0, 2.0]),
        )
        .unwrap();

        let (extent, cells) = cell_values(&GridToVtk::new().convert_2d(&grid));
        assert_eq!(cells, vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(extent, Extent::Ranges([0..=2, 0..=1, 0..=3]));
    }

    #[test]
    fn configuration_is_applied() {
        let converter = GridToVtk::builder()
            .array_name("layer")
            .origin([1.0, 2.0, 3.0])
            .spacing([25.0, 25.0, 5.0])
            .title("test")
            .build();

        let vtk = converter.convert_cells([1, 1, 1], vec![7]).unwrap();
        assert_eq!(vtk.title, "test");
        assert_eq!(vtk.byte_order, ByteOrder::BigEndian);

        match vtk.data {
            DataSet::ImageData {
                origin,
                spacing,
                pieces,
                ..
            } => {
                assert_eq!(origin, [1.0, 2.0, 3.0]);
                assert_eq!(spacing, [25.0, 25.0, 5.0]);
                match &pieces[0] {
                    Piece::Inline(piece) => match &piece.data.cell[0] {
                        Attribute::DataArray(array) => assert_eq!(array.name, "layer"),
                        _ => panic!("expected a data array"),
                    },
                    _ => panic!("expected an inline piece"),
                }
            }
            _ => panic!("expected image data"),
        }
    }
}
