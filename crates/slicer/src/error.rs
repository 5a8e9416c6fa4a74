//! Result and Error types for layerview-slicer

/// Type alias for Result<T, slicer::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `layerview-slicer` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("grid operation failed: {0}")]
    GridError(#[from] layerview_grid::Error),

    #[error("renderer failed: {0}")]
    RendererError(String),
}
