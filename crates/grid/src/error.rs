//! Result and Error types for layerview-grid

use crate::axis::AxisName;

/// Type alias for Result<T, grid::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `layerview-grid` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("failed to parse JSON document")]
    JSONError(#[from] serde_json::Error),

    #[error("array shape error")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    #[error("utility operation failed: {0}")]
    UtilsError(#[from] layerview_utils::Error),

    #[error("required field \"{field}\" is missing or null")]
    MissingField { field: String },

    #[error("field \"{field}\" is not {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    #[error("failed to convert {value} at \"{field}\" to a {target}")]
    ValueConversion {
        field: String,
        value: String,
        target: &'static str,
    },

    #[error("inconsistent length of \"{field}\" (expected {expected:?}, found {found:?})")]
    InconsistentLength {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("{axis} axis has {found:?} values for a grid extent of {expected:?}")]
    AxisLengthMismatch {
        axis: AxisName,
        expected: usize,
        found: usize,
    },

    #[error("{axis} axis is not strictly increasing at index {index:?}")]
    AxisNotIncreasing { axis: AxisName, index: usize },

    #[error("model contains no voxels")]
    EmptyModel,

    #[error("unknown model field \"{0}\", expected \"model\" or \"model_mask\"")]
    UnknownField(String),

    #[error("unknown axis \"{0}\"")]
    UnknownAxis(String),
}
