//! Integration tests for slicing a loaded model

use layerview_grid::vtk::VtkFormat;
use layerview_grid::{read_model_from, Axis, AxisName, VoxelGrid};
use layerview_slicer::{AxisSlicer, Error, RenderFrame, Renderer, SliceMode, VtkFileRenderer};
use ndarray::Array3;
use rstest::{fixture, rstest};

/// 3x2x4 model from the grid test data, cell (i, j, k) holds 100i + 10j + k
#[fixture]
fn basin() -> VoxelGrid {
    read_model_from("../grid/data/basin_3d.json").unwrap()
}

/// Model with the same [10, 20, 30, 40] axis in every direction
#[fixture]
fn cube() -> VoxelGrid {
    let axis = || Axis::from(vec![10.0, 20.0, 30.0, 40.0]);
    let values = Array3::from_shape_fn((4, 4, 4), |(i, j, k)| (16 * i + 4 * j + k) as i32);
    VoxelGrid::new(values, axis(), axis(), axis()).unwrap()
}

#[rstest]
#[case(30.0, 3)] // exact match
#[case(25.0, 2)] // between grid lines
#[case(10.0, 1)] // first value
#[case(40.0, 4)] // last value
#[case(-100.0, 1)] // below range
#[case(1.0e9, 4)] // above range
fn truncation_index_boundaries(cube: VoxelGrid, #[case] value: f64, #[case] expected: usize) {
    let mut slicer = AxisSlicer::new(&cube);
    for axis in AxisName::ALL {
        slicer.update(axis, value).unwrap();
        assert_eq!(slicer.bounds().get(axis), expected);
    }
}

#[rstest]
fn independent_updates(basin: VoxelGrid) {
    let mut slicer = AxisSlicer::new(&basin);

    let frame = slicer.update(AxisName::Z, 20.0).unwrap();
    assert_eq!(frame.shape, [3, 2, 2]);

    // x only, z comes back at full extent but stays remembered
    let frame = slicer.update(AxisName::X, 250.0).unwrap();
    assert_eq!(frame.shape, [2, 2, 4]);
    assert_eq!(slicer.bounds().z, 2);
    assert_eq!(slicer.bounds().y, 2);

    // every value in the frame is from the first two x layers
    assert!(frame.values.iter().all(|v| v / 100 < 2));
}

#[rstest]
fn cumulative_updates(basin: VoxelGrid) {
    let mut slicer = AxisSlicer::builder(&basin)
        .mode(SliceMode::Cumulative)
        .build();

    slicer.update(AxisName::Z, 20.0).unwrap();
    let frame = slicer.update(AxisName::X, 250.0).unwrap();
    assert_eq!(frame.shape, [2, 2, 2]);
    assert_eq!(frame, slicer.current_frame());
}

#[rstest]
fn updates_are_idempotent(basin: VoxelGrid) {
    let mut slicer = AxisSlicer::new(&basin);
    let first = slicer.update(AxisName::Y, 100.0).unwrap();
    let second = slicer.update(AxisName::Y, 100.0).unwrap();
    assert_eq!(first, second);

    // going back to full extent gives the full model again
    slicer.update(AxisName::Y, 1000.0).unwrap();
    assert_eq!(slicer.current_frame(), slicer.full_frame());
}

#[rstest]
#[case(AxisName::X, 0.0)] // case 1
#[case(AxisName::X, 600.0)] // case 2
#[case(AxisName::Y, 0.0)] // case 3
#[case(AxisName::Z, 35.0)] // case 4
#[case(AxisName::Z, 5.0)] // case 5
fn frame_shapes_are_consistent(basin: VoxelGrid, #[case] axis: AxisName, #[case] value: f64) {
    let mut slicer = AxisSlicer::new(&basin);
    let frame = slicer.update(axis, value).unwrap();

    assert_eq!(frame.len(), frame.shape.iter().product::<usize>());
    assert_eq!(frame.dimensions(), frame.shape.map(|n| n + 1));
    assert!(!frame.is_empty());

    // the frame is a prefix of the full render order grid in every dimension
    let full = slicer.full_frame();
    let [nx, ny, nz] = frame.shape;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                assert_eq!(frame.get(i, j, k), full.get(i, j, k));
            }
        }
    }
}

#[rstest]
fn frames_reach_the_renderer(basin: VoxelGrid) {
    let mut slicer = AxisSlicer::new(&basin);
    let mut frames: Vec<RenderFrame> = Vec::new();

    slicer.update_and_redraw(AxisName::Z, 20.0, &mut frames).unwrap();
    slicer.update_and_redraw(AxisName::X, 0.0, &mut frames).unwrap();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].shape, [3, 2, 2]);
    assert_eq!(frames[1].shape, [1, 2, 4]);
    assert_eq!(frames[1].bounds[2], (10.0, 40.0));
}

#[rstest]
fn vtk_frames_are_written(basin: VoxelGrid) {
    let dir = tempfile::tempdir().unwrap();
    let mut slicer = AxisSlicer::new(&basin);
    let mut renderer =
        VtkFileRenderer::new(dir.path().join("frames").join("slice"), VtkFormat::LegacyAscii)
            .numbered(true);

    slicer.update_and_redraw(AxisName::Z, 20.0, &mut renderer).unwrap();
    renderer.redraw(&slicer.full_frame()).unwrap();

    let written = renderer.written();
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("frames/slice_0000.vtk"));
    assert!(written[1].ends_with("frames/slice_0001.vtk"));

    let content = std::fs::read_to_string(&written[0]).unwrap();
    assert!(content.contains("STRUCTURED_POINTS"));
    assert!(content.contains("values"));
}

#[rstest]
fn numbered_frames_with_dotted_stem(basin: VoxelGrid) {
    let dir = tempfile::tempdir().unwrap();
    let mut slicer = AxisSlicer::new(&basin);
    let mut renderer =
        VtkFileRenderer::new(dir.path().join("slice.vti"), VtkFormat::LegacyAscii).numbered(true);

    slicer.update_and_redraw(AxisName::X, 100.0, &mut renderer).unwrap();
    slicer.update_and_redraw(AxisName::Z, 2.0, &mut renderer).unwrap();

    let written = renderer.written();
    assert_eq!(written.len(), 2);
    assert_ne!(written[0], written[1]);
    assert!(written[0].ends_with("slice_0000.vtk"));
    assert!(written[1].ends_with("slice_0001.vtk"));
    assert!(written.iter().all(|path| path.exists()));
}

/// Renderer whose display has gone away
struct ClosedWindow;

impl Renderer for ClosedWindow {
    fn redraw(&mut self, _frame: &RenderFrame) -> layerview_slicer::Result<()> {
        Err(Error::RendererError("window closed".into()))
    }
}

#[rstest]
fn renderer_errors_are_returned(basin: VoxelGrid) {
    let mut slicer = AxisSlicer::new(&basin);
    let result = slicer.update_and_redraw(AxisName::Y, 0.0, &mut ClosedWindow);

    match result {
        Err(Error::RendererError(message)) => assert_eq!(message, "window closed"),
        other => panic!("expected a renderer error, got {other:?}"),
    }
    // the bound is kept even though the frame was not shown
    assert_eq!(slicer.bounds().y, 1);
}
