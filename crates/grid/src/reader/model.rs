// crate modules
use crate::axis::{Axis, AxisName};
use crate::error::{Error, Result};
use crate::grid::{Grid2D, VoxelGrid};
use crate::reader::parsers;

// layerview modules
use layerview_utils::f;

// standard library
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info};
use ndarray::{Array2, Array3};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Deserializer, Value};

/// Which top level field holds the mask data
///
/// The generator writes both a `model` (raw layer values) and a `model_mask`
/// (layer labels) field, either of which may be `null` if it was not saved.
///
/// ```rust
/// # use layerview_grid::reader::ModelField;
/// assert_eq!("model".parse::<ModelField>().unwrap(), ModelField::Model);
/// assert_eq!(ModelField::default().key(), "model_mask");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelField {
    /// The `model_mask` field, used by the viewers by default
    #[default]
    #[value(name = "model_mask")]
    ModelMask,
    /// The `model` field
    Model,
}

impl ModelField {
    /// Name of the field in the JSON document
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ModelMask => "model_mask",
            Self::Model => "model",
        }
    }
}

impl std::str::FromStr for ModelField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "model_mask" => Ok(Self::ModelMask),
            "model" => Ok(Self::Model),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

impl std::fmt::Display for ModelField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Only the parts of a model document the viewers care about
///
/// Anything else in the file (generation parameters, borders, fill values) is
/// skipped by the deserialiser rather than held in memory. The grid that was
/// not asked for is read as [IgnoredAny], so only one grid is ever loaded.
#[derive(Debug, Deserialize)]
struct Document<M, K> {
    model: Option<M>,
    model_mask: Option<K>,
    #[serde(default)]
    output_axes: Option<OutputAxes>,
}

#[derive(Debug, Deserialize)]
struct OutputAxes {
    #[serde(default)]
    x_ax: Option<Vec<Value>>,
    #[serde(default)]
    y_ax: Option<Vec<Value>>,
    #[serde(default)]
    z_ax: Option<Vec<Value>>,
}

/// A configurable reader for layered model JSON files
///
/// Handles both the 3D model layout
///
/// ```json
/// {"model_mask": [{"x0": [{"y0": [1, 1, 2]}, {"y1": [1, 2, 2]}]}, ...],
///  "output_axes": {"x_ax": [...], "y_ax": [...], "z_ax": [...]}}
/// ```
///
/// and the 2D section layout, where each `x<i>` holds the values directly
///
/// ```json
/// {"model_mask": [{"x0": [1, 1, 2]}, {"x1": [1, 2, 2]}, ...],
///  "output_axes": {"x_ax": [...], "z_ax": [...]}}
/// ```
///
/// Every layer object is looked up by its positional key, so element `i` of
/// the array must contain `x<i>` and row `j` must contain `y<j>`. Anything else
/// is an error. There is no partial success, the first bad value fails the
/// whole read.
///
/// Minimal Example:
/// ```rust
/// # use layerview_grid::reader::ModelReader;
/// let json = r#"{
///     "model_mask": [{"x0": [{"y0": [1, 2]}]}, {"x1": [{"y0": [3, 4]}]}],
///     "output_axes": {"x_ax": [0, 10], "y_ax": ["0.0"], "z_ax": [1, 2]}
/// }"#;
///
/// let grid = ModelReader::new().parse_str(json).unwrap();
/// assert_eq!(grid.shape(), [2, 1, 2]);
/// assert_eq!(grid.get(1, 0, 0), Some(3));
/// ```
#[derive(Debug)]
pub struct ModelReader {
    /// Field holding the mask data
    field: ModelField,
    /// Disable progress bar?
    disable_progress: bool,
    /// Reject axes that are not strictly increasing
    validate_axes: bool,
}

impl Default for ModelReader {
    fn default() -> Self {
        Self {
            field: ModelField::ModelMask,
            disable_progress: true,
            validate_axes: true,
        }
    }
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl ModelReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Setter for the field holding the mask data
    pub fn set_field(&mut self, field: ModelField) {
        self.field = field;
    }

    /// Print a progress bar while converting layers
    pub fn enable_progress(&mut self) {
        self.disable_progress = false;
    }

    /// Do not print the progress bar (default)
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Accept axes that are not strictly increasing
    ///
    /// Lengths are always checked against the grid dimensions.
    pub fn skip_axis_validation(&mut self) {
        self.validate_axes = false;
    }

    /// Read a 3D model from the file at `path`
    pub fn parse(&self, path: &Path) -> Result<VoxelGrid> {
        info!("Loading {}", path.display());
        self.read(BufReader::new(File::open(path)?))
    }

    /// Read a 2D section from the file at `path`
    pub fn parse_2d(&self, path: &Path) -> Result<Grid2D> {
        info!("Loading 2D {}", path.display());
        self.read_2d(BufReader::new(File::open(path)?))
    }

    /// Read a 3D model from a JSON string
    pub fn parse_str(&self, json: &str) -> Result<VoxelGrid> {
        self.build_3d(self.load(Deserializer::from_str(json))?)
    }

    /// Read a 2D section from a JSON string
    pub fn parse_str_2d(&self, json: &str) -> Result<Grid2D> {
        self.build_2d(self.load(Deserializer::from_str(json))?)
    }

    /// Read a 3D model from any reader
    pub fn read<R: Read>(&self, reader: R) -> Result<VoxelGrid> {
        self.build_3d(self.load(Deserializer::from_reader(reader))?)
    }

    /// Read a 2D section from any reader
    pub fn read_2d<R: Read>(&self, reader: R) -> Result<Grid2D> {
        self.build_2d(self.load(Deserializer::from_reader(reader))?)
    }
}

// ! ------------------------------------------------------------------------
// !                          Document conversion
// ! ------------------------------------------------------------------------

impl ModelReader {
    /// Deserialise the selected field and the axes, skipping the other grid
    fn load<'de, R: serde_json::de::Read<'de>>(
        &self,
        mut deserializer: Deserializer<R>,
    ) -> Result<(Value, Option<OutputAxes>)> {
        let (model, axes) = match self.field {
            ModelField::Model => {
                let document = Document::<Value, IgnoredAny>::deserialize(&mut deserializer)?;
                (document.model, document.output_axes)
            }
            ModelField::ModelMask => {
                let document = Document::<IgnoredAny, Value>::deserialize(&mut deserializer)?;
                (document.model_mask, document.output_axes)
            }
        };
        deserializer.end()?;
        info!("JSON loaded");

        let model = model.ok_or_else(|| Error::MissingField {
            field: self.field.key().to_string(),
        })?;
        Ok((model, axes))
    }

    fn build_3d(&self, (model, axes): (Value, Option<OutputAxes>)) -> Result<VoxelGrid> {
        let values = self.collect_3d(&model, self.field.key())?;
        drop(model);

        let axes = Self::output_axes(axes.as_ref())?;
        let x = self.collect_axis(axes, AxisName::X)?;
        let y = self.collect_axis(axes, AxisName::Y)?;
        let z = self.collect_axis(axes, AxisName::Z)?;

        let grid = VoxelGrid::new(values, x, y, z)?;
        info!("JSON converted");
        debug!("{grid}");
        Ok(grid)
    }

    fn build_2d(&self, (model, axes): (Value, Option<OutputAxes>)) -> Result<Grid2D> {
        let values = self.collect_2d(&model, self.field.key())?;
        drop(model);

        let axes = Self::output_axes(axes.as_ref())?;
        let x = self.collect_axis(axes, AxisName::X)?;
        let z = self.collect_axis(axes, AxisName::Z)?;

        let grid = Grid2D::new(values, x, z)?;
        info!("JSON converted");
        debug!("{grid}");
        Ok(grid)
    }

    /// Walk `[{"x<i>": [{"y<j>": [v, ...]}, ...]}, ...]` into an `[x][y][z]` array
    fn collect_3d(&self, model: &Value, field: &str) -> Result<Array3<i32>> {
        let layers = parsers::array(model, field)?;
        let (ny, nz) = Self::extents_3d(layers, field)?;
        let nx = layers.len();
        debug!("{field} size(x, y, z): {nx} {ny} {nz}");

        let mut data = Vec::with_capacity(nx * ny * nz);
        let mut progress_bar = self.init_progress_bar(nx)?;

        for (i, layer) in layers.iter().enumerate() {
            let layer_field = f!("{field}[{i}]");
            let rows = parsers::positional(layer, 'x', i, &layer_field)?;
            let rows_field = f!("{layer_field}.x{i}");
            let rows = parsers::array(rows, &rows_field)?;
            Self::check_length(&rows_field, ny, rows.len())?;

            for (j, row) in rows.iter().enumerate() {
                let row_field = f!("{rows_field}[{j}]");
                let column = parsers::positional(row, 'y', j, &row_field)?;
                let column_field = f!("{row_field}.y{j}");
                let column = parsers::array(column, &column_field)?;
                Self::check_length(&column_field, nz, column.len())?;

                for (k, leaf) in column.iter().enumerate() {
                    data.push(parsers::mask_value(leaf, &f!("{column_field}[{k}]"))?);
                }
            }

            progress_bar.update(1)?;
        }

        if !self.disable_progress {
            eprintln!()
        };

        Ok(Array3::from_shape_vec((nx, ny, nz), data)?)
    }

    /// Walk `[{"x<i>": [v, ...]}, ...]` into an `[x][z]` array
    fn collect_2d(&self, model: &Value, field: &str) -> Result<Array2<i32>> {
        let layers = parsers::array(model, field)?;
        let nx = layers.len();
        let nz = match layers.first() {
            Some(first) => {
                let column_field = f!("{field}[0]");
                parsers::array(parsers::positional(first, 'x', 0, &column_field)?, &column_field)?
                    .len()
            }
            None => return Err(Error::EmptyModel),
        };
        debug!("{field} size(x, z): {nx} {nz}");

        let mut data = Vec::with_capacity(nx * nz);
        let mut progress_bar = self.init_progress_bar(nx)?;

        for (i, layer) in layers.iter().enumerate() {
            let layer_field = f!("{field}[{i}]");
            let column = parsers::positional(layer, 'x', i, &layer_field)?;
            let column_field = f!("{layer_field}.x{i}");
            let column = parsers::array(column, &column_field)?;
            Self::check_length(&column_field, nz, column.len())?;

            for (k, leaf) in column.iter().enumerate() {
                data.push(parsers::mask_value(leaf, &f!("{column_field}[{k}]"))?);
            }

            progress_bar.update(1)?;
        }

        if !self.disable_progress {
            eprintln!()
        };

        Ok(Array2::from_shape_vec((nx, nz), data)?)
    }

    /// Take the y and z extents from the first layer and row
    fn extents_3d(layers: &[Value], field: &str) -> Result<(usize, usize)> {
        let first = layers.first().ok_or(Error::EmptyModel)?;
        let layer_field = f!("{field}[0]");
        let rows = parsers::array(parsers::positional(first, 'x', 0, &layer_field)?, &layer_field)?;

        let row = rows.first().ok_or(Error::EmptyModel)?;
        let row_field = f!("{layer_field}.x0[0]");
        let column = parsers::array(parsers::positional(row, 'y', 0, &row_field)?, &row_field)?;

        Ok((rows.len(), column.len()))
    }

    fn output_axes(axes: Option<&OutputAxes>) -> Result<&OutputAxes> {
        axes.ok_or_else(|| Error::MissingField {
                field: "output_axes".to_string(),
            })
    }

    fn collect_axis(&self, axes: &OutputAxes, name: AxisName) -> Result<Axis> {
        let field = f!("output_axes.{}", name.json_key());
        let nodes = match name {
            AxisName::X => axes.x_ax.as_ref(),
            AxisName::Y => axes.y_ax.as_ref(),
            AxisName::Z => axes.z_ax.as_ref(),
        }
        .ok_or_else(|| Error::MissingField {
            field: field.clone(),
        })?;

        let values = parsers::coordinates(nodes, &field)?;
        if self.validate_axes {
            Axis::try_new(name, values)
        } else {
            Ok(Axis::from(values))
        }
    }

    fn check_length(field: &str, expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Error::InconsistentLength {
                field: field.to_string(),
                expected,
                found,
            })
        }
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        let mut bar = BarBuilder::default()
            .total(total)
            .desc("Converting layers")
            .unit(" layers")
            .disable(self.disable_progress)
            .bar_format("{desc}: {count}/{total} [{elapsed}]   ")
            .build()
            .map_err(|e| Error::ProgressBar(f!("{e:?}")))?;

        if !self.disable_progress {
            bar.refresh()?;
        }
        Ok(bar)
    }
}
