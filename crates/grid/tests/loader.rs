//! Integration tests for reading model files

use layerview_grid::reader::{open_either, ModelField, ModelReader};
use layerview_grid::{read_model, read_model_2d_from, read_model_from, AxisName, Error, VoxelGrid};
use rstest::{fixture, rstest};
use std::io::Read;
use std::path::Path;

#[fixture]
fn basin() -> VoxelGrid {
    read_model_from("./data/basin_3d.json").unwrap()
}

#[rstest]
fn basin_round_trip(basin: VoxelGrid) {
    let [nx, ny, nz] = basin.shape();
    assert_eq!([nx, ny, nz], [3, 2, 4]);

    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let expected = (100 * i + 10 * j + k) as i32;
                assert_eq!(basin.get(i, j, k), Some(expected));
            }
        }
    }

    assert_eq!(basin.axis(AxisName::X).len(), 4);
    assert_eq!(basin.axis(AxisName::Y).len(), 3);
    assert_eq!(basin.axis(AxisName::Z).bounds(), Some((10.0, 40.0)));
}

#[rstest]
fn basin_reorder(basin: VoxelGrid) {
    let [nx, ny, nz] = basin.shape();
    let render = basin.reorder_zyx_inverted();

    assert_eq!(render.dim(), (nz, ny, nx));
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                assert_eq!(render[[nz - 1 - k, j, i]], basin.values()[[i, j, k]]);
            }
        }
    }

    // the top layer comes first
    assert_eq!(render[[0, 1, 2]], 213);
}

#[rstest]
fn raw_model_field(basin: VoxelGrid) {
    let mut reader = ModelReader::new();
    reader.set_field(ModelField::Model);
    let raw = reader.parse(Path::new("./data/basin_3d.json")).unwrap();

    assert_eq!(raw.shape(), basin.shape());
    assert!(raw.values().iter().all(|v| *v == 1));
}

#[rstest]
fn section_round_trip() {
    let section = read_model_2d_from("./data/section_2d.json").unwrap();
    assert_eq!(section.shape(), [4, 3]);
    assert_eq!(section.get(3, 2), Some(4));

    let image = section.transpose();
    assert_eq!(image.dim(), (3, 4));
    assert_eq!(image.row(1).to_vec(), vec![2, 2, 3, 3]);
}

#[rstest]
fn fallback_to_working_directory() {
    // "../data/basin_3d.json" does not exist from the crate root
    let grid = read_model("data/basin_3d.json").unwrap();
    assert_eq!(grid, read_model_from("./data/basin_3d.json").unwrap());
}

#[rstest]
fn fallback_prefers_primary() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.json");
    let fallback = dir.path().join("fallback.json");
    std::fs::write(&primary, "primary").unwrap();
    std::fs::write(&fallback, "fallback").unwrap();

    let (path, mut file) = open_either(&primary, &fallback).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    assert_eq!(path, primary);
    assert_eq!(content, "primary");

    // only a missing primary moves on to the fallback
    std::fs::remove_file(&primary).unwrap();
    let (path, _) = open_either(&primary, &fallback).unwrap();
    assert_eq!(path, fallback);

    // and a missing fallback is reported as an I/O error
    std::fs::remove_file(&fallback).unwrap();
    assert!(matches!(
        open_either(&primary, &fallback),
        Err(Error::IOError(_))
    ));
}

#[rstest]
#[case("./data/misordered_keys.json", "model_mask[0].x0")] // case 1
#[case("./data/bad_value.json", "model_mask[0].x0[0].y0[1]")] // case 2
fn invalid_models(#[case] path: &str, #[case] expected_field: &str) {
    let field = match read_model_from(path).unwrap_err() {
        Error::MissingField { field } => field,
        Error::ValueConversion { field, .. } => field,
        e => panic!("unexpected error: {e}"),
    };
    assert_eq!(field, expected_field);
}

#[rstest]
fn missing_file() {
    assert!(matches!(
        read_model_from("./data/not_a_model.json"),
        Err(Error::IOError(_))
    ));
}
