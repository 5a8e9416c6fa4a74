//! Frames handed to renderers and the renderer interface

// crate modules
use crate::error::Result;

// layerview modules
use layerview_grid::vtk::{GridToVtk, VtkFormat};
use layerview_grid::write_vtk;
use layerview_utils::f;

// standard library
use std::path::{Path, PathBuf};

// external crates
use log::info;

/// A truncated grid flattened for a renderer
///
/// Values are ordered with x varying fastest, then y, then z, where z runs
/// from the top of the model downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Number of cells along `[x, y, z]`
    pub shape: [usize; 3],
    /// One value per cell
    pub values: Vec<i32>,
    /// The (first, last) coordinates of the x, y, z axes, for labelling
    pub bounds: [(f64, f64); 3],
}

impl RenderFrame {
    /// Number of grid points along `[x, y, z]`, one more than the cells
    ///
    /// ```rust
    /// # use layerview_slicer::RenderFrame;
    /// let frame = RenderFrame {
    ///     shape: [3, 2, 1],
    ///     values: vec![0; 6],
    ///     bounds: [(0.0, 3.0), (0.0, 2.0), (0.0, 1.0)],
    /// };
    /// assert_eq!(frame.dimensions(), [4, 3, 2]);
    /// ```
    pub fn dimensions(&self) -> [usize; 3] {
        self.shape.map(|n| n + 1)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the frame has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the cell at `(i, j, k)` in frame order
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<i32> {
        let [nx, ny, nz] = self.shape;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        self.values.get(i + nx * (j + ny * k)).copied()
    }
}

/// Anything that can draw a [RenderFrame]
///
/// Called once per update with a frame derived from the full model, so an
/// implementation can throw away whatever it drew last time.
pub trait Renderer {
    /// Replace whatever is currently shown with `frame`
    fn redraw(&mut self, frame: &RenderFrame) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn redraw(&mut self, frame: &RenderFrame) -> Result<()> {
        (**self).redraw(frame)
    }
}

/// Keeps a copy of every frame, mostly useful for testing and replays
impl Renderer for Vec<RenderFrame> {
    fn redraw(&mut self, frame: &RenderFrame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Write every frame to a VTK file for an external viewer
///
/// By default each frame replaces the previous file, so a viewer watching the
/// file sees the latest state. With [VtkFileRenderer::numbered] every frame
/// gets its own file instead, e.g. `slice_0000.vti`, `slice_0001.vti`, ...
/// Any extension on the stem is replaced by the format's.
///
/// ```rust, no_run
/// # use layerview_grid::{read_model, AxisName};
/// # use layerview_grid::vtk::VtkFormat;
/// # use layerview_slicer::{AxisSlicer, VtkFileRenderer};
/// let grid = read_model("my_model.json").unwrap();
/// let mut slicer = AxisSlicer::new(&grid);
/// let mut renderer = VtkFileRenderer::new("slice", VtkFormat::Xml).numbered(true);
///
/// slicer.update_and_redraw(AxisName::Z, 1500.0, &mut renderer).unwrap();
/// ```
#[derive(Debug)]
pub struct VtkFileRenderer {
    converter: GridToVtk,
    stem: PathBuf,
    format: VtkFormat,
    numbered: bool,
    count: usize,
    written: Vec<PathBuf>,
}

impl VtkFileRenderer {
    /// Renderer writing to `stem` with the format's extension
    pub fn new<P: AsRef<Path>>(stem: P, format: VtkFormat) -> Self {
        Self {
            converter: GridToVtk::default(),
            stem: stem.as_ref().to_path_buf(),
            format,
            numbered: false,
            count: 0,
            written: Vec::new(),
        }
    }

    /// Give every frame its own numbered file
    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    /// Use a custom VTK conversion, e.g. for voxel spacing
    pub fn converter(mut self, converter: GridToVtk) -> Self {
        self.converter = converter;
        self
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self) -> PathBuf {
        if !self.numbered {
            return self.stem.clone();
        }

        let name = self
            .stem
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.stem.with_file_name(f!("{name}_{:04}", self.count))
    }
}

impl Renderer for VtkFileRenderer {
    fn redraw(&mut self, frame: &RenderFrame) -> Result<()> {
        let vtk = self.converter.convert_cells(frame.shape, frame.values.clone())?;
        let path = self.next_path();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let path = write_vtk(vtk, path, self.format)?;
        info!("Frame {} written to {}", self.count, path.display());

        self.count += 1;
        self.written.push(path);
        Ok(())
    }
}
