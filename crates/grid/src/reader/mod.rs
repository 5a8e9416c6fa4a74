//! Logic for reading layered model JSON files
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest methods for reading a model are the convenience functions:
//!
//! ```rust, no_run
//! # use layerview_grid::{read_model, read_model_from};
//! // Look for "../my_model.json", then "./my_model.json"
//! let grid = read_model("my_model.json").unwrap();
//!
//! // Read from an explicit path, no fallback
//! let grid = read_model_from("/path/to/my_model.json").unwrap();
//! ```
//!
//! Under the hood these initialise a [ModelReader]. This is made public for
//! fine control if needed, for example to read the raw `model` field rather
//! than the `model_mask`.
//!
//! ```rust, no_run
//! # use layerview_grid::reader::{ModelField, ModelReader};
//! # use std::path::Path;
//! let mut reader = ModelReader::new();
//! reader.set_field(ModelField::Model);
//! reader.enable_progress();
//!
//! let grid = reader.parse(Path::new("/path/to/my_model.json")).unwrap();
//! ```
//!
//! # File lookup
//!
//! The viewers are usually run from a sub-directory of the directory the
//! generator wrote to, so bare file names are looked for in the parent
//! directory first and then in the working directory. Only a missing file
//! moves on to the next candidate, any other I/O failure is returned as is.
//!
//! # Formatting notes
//!
//! Layers are stored as an array of single-key objects, where the key repeats
//! the array position. Element `i` must hold `x<i>` and row `j` must hold
//! `y<j>`. Keys that do not match the position are treated as missing.
//!
//! Leaf values may be integers, floats (truncated), or numeric strings. Axis
//! coordinates may be numbers or numeric strings.

// reader modules
mod model;
mod parsers;

// re-exports for clean API + documentation
#[doc(inline)]
pub use model::{ModelField, ModelReader};

// crate modules
use crate::error::Result;
use crate::grid::{Grid2D, VoxelGrid};

// standard library
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

// external crates
use log::{debug, info};

/// Default file name for a 3D model
pub const DEFAULT_MODEL_FILE: &str = "my_model.json";

/// Default file name for a 2D section
pub const DEFAULT_MODEL_2D_FILE: &str = "my_model2D.json";

/// Open `primary`, or `fallback` if `primary` does not exist
///
/// Returns the path that was actually opened alongside the file handle. Only
/// [ErrorKind::NotFound] moves on to the fallback, so a permission problem on
/// the primary file is reported rather than silently skipped.
///
/// ```rust
/// # use layerview_grid::reader::open_either;
/// # use std::path::Path;
/// let result = open_either(Path::new("missing_a.json"), Path::new("missing_b.json"));
/// assert!(result.is_err());
/// ```
pub fn open_either(primary: &Path, fallback: &Path) -> Result<(PathBuf, File)> {
    match File::open(primary) {
        Ok(file) => Ok((primary.to_path_buf(), file)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} not found, trying {}", primary.display(), fallback.display());
            let file = File::open(fallback)?;
            Ok((fallback.to_path_buf(), file))
        }
        Err(e) => Err(e.into()),
    }
}

/// Open a bare file name from the parent directory or the working directory
///
/// Equivalent to `open_either("../<name>", "./<name>")`.
pub fn open_with_fallback<P: AsRef<Path>>(name: P) -> Result<(PathBuf, File)> {
    let name = name.as_ref();
    let primary = Path::new("..").join(name);
    let fallback = Path::new(".").join(name);
    open_either(&primary, &fallback)
}

/// Read a 3D model by name, with the parent directory fallback
///
/// - `name` - Bare file name, e.g. [DEFAULT_MODEL_FILE]
///
/// Example
/// ```rust, no_run
/// # use layerview_grid::{read_model, VoxelGrid};
/// # use layerview_grid::reader::DEFAULT_MODEL_FILE;
/// let grid: VoxelGrid = read_model(DEFAULT_MODEL_FILE).unwrap();
/// ```
pub fn read_model<P: AsRef<Path>>(name: P) -> Result<VoxelGrid> {
    let (path, file) = open_with_fallback(name)?;
    info!("Loading {}", path.display());
    ModelReader::new().read(BufReader::new(file))
}

/// Read a 3D model from an explicit path
///
/// - `path` - Path to the model file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use layerview_grid::{read_model_from, VoxelGrid};
/// let grid: VoxelGrid = read_model_from("path/to/my_model.json").unwrap();
/// ```
pub fn read_model_from<P: AsRef<Path>>(path: P) -> Result<VoxelGrid> {
    ModelReader::new().parse(path.as_ref())
}

/// Read a 2D section by name, with the parent directory fallback
///
/// - `name` - Bare file name, e.g. [DEFAULT_MODEL_2D_FILE]
pub fn read_model_2d<P: AsRef<Path>>(name: P) -> Result<Grid2D> {
    let (path, file) = open_with_fallback(name)?;
    info!("Loading 2D {}", path.display());
    ModelReader::new().read_2d(BufReader::new(file))
}

/// Read a 2D section from an explicit path
pub fn read_model_2d_from<P: AsRef<Path>>(path: P) -> Result<Grid2D> {
    ModelReader::new().parse_2d(path.as_ref())
}
