// crate modules
use crate::vtk::GridToVtk;

// external crates
use vtkio::model::ByteOrder;

/// Builder implementation for GridToVtk configuration
///
/// The fields of [GridToVtk] are left public for direct use but the module also
/// implements a builder, allowing chained setter calls for any number of
/// parameters (including none).
///
/// To get the final [GridToVtk] from the builder, call
/// [build()](GridToVtkBuilder::build).
///
/// ```rust, no_run
/// # use layerview_grid::vtk::{write_vtk, GridToVtk, VtkFormat};
/// # use layerview_grid::read_model;
/// # use vtkio::model::ByteOrder;
/// # let grid = read_model("my_model.json").unwrap();
/// let converter = GridToVtk::builder()
///     .array_name("lithology")
///     .byte_order(ByteOrder::LittleEndian)
///     .title("Layered model")
///     .build();
///
/// let vtk = converter.convert(&grid);
/// write_vtk(vtk, "./output", VtkFormat::LegacyAscii).unwrap();
/// ```
#[derive(Debug)]
pub struct GridToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Name of the cell data array
    array_name: String,
    /// Position of the first grid point
    origin: [f32; 3],
    /// Size of a voxel along x, y, z
    spacing: [f32; 3],
    /// Title written to the file header
    title: String,
}

impl GridToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [GridToVtk] type
    pub fn build(self) -> GridToVtk {
        GridToVtk {
            byte_order: self.byte_order,
            array_name: self.array_name,
            origin: self.origin,
            spacing: self.spacing,
            title: self.title,
        }
    }

    /// Set the byte ordering
    ///
    /// VisIt only reads big endian, even though most systems are little endian,
    /// so big endian is the default.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Name of the cell data array, `values` by default
    pub fn array_name(mut self, name: impl Into<String>) -> Self {
        self.array_name = name.into();
        self
    }

    /// Position of the first grid point, `[0.0, 0.0, 0.0]` by default
    pub fn origin(mut self, origin: [f32; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Voxel size along each dimension, `[1.0, 1.0, 1.0]` by default
    pub fn spacing(mut self, spacing: [f32; 3]) -> Self {
        self.spacing = spacing;
        self
    }

    /// Title for the file header
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for GridToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            array_name: "values".to_string(),
            origin: [0.0; 3],
            spacing: [1.0; 3],
            title: "layerview model".to_string(),
        }
    }
}
