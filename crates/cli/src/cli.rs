//! Command line arguments

// layerview modules
use layerview_grid::reader::ModelField;
use layerview_grid::vtk::VtkFormat;

// standard library
use std::path::PathBuf;

// external crates
use clap::{ArgAction, Args, Parser, Subcommand};

/// Export and slice layered voxel models for plotting
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show a progress bar while converting layers
    #[arg(long, global = true)]
    pub progress: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 3D model in render order, optionally clipped along each axis
    Model(ModelArgs),

    /// 2D section through a model
    #[command(name = "model2d")]
    Model2d(SectionArgs),

    /// Raw `model` field in plain z, y, x order with no inversion
    Legacy(SectionArgs),
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Path to the model file [default: my_model.json]
    pub file: Option<PathBuf>,

    /// Field holding the layer labels
    #[arg(long, value_enum, default_value_t = ModelField::ModelMask)]
    pub field: ModelField,

    /// Clip at this x coordinate
    ///
    /// Clips are applied in x, y, z order, whatever order they are given in.
    #[arg(short, allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// Clip at this y coordinate
    ///
    /// Clips are applied in x, y, z order, whatever order they are given in.
    #[arg(short, allow_negative_numbers = true)]
    pub y: Option<f64>,

    /// Clip at this z coordinate
    ///
    /// Clips are applied in x, y, z order, whatever order they are given in.
    #[arg(short, allow_negative_numbers = true)]
    pub z: Option<f64>,

    /// Keep earlier clips when applying the next one
    #[arg(long)]
    pub cumulative: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SectionArgs {
    /// Path to the model file
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output file, the extension is set by the format
    #[arg(short, long, default_value = "layerview")]
    pub output: PathBuf,

    /// VTK file format
    #[arg(long, value_enum, default_value_t = VtkFormat::Xml)]
    pub format: VtkFormat,

    /// Write binary data as little endian
    #[arg(long)]
    pub little_endian: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn model_defaults() {
        let cli = Cli::try_parse_from(["layerview", "model"]).unwrap();
        match cli.command {
            Command::Model(args) => {
                assert!(args.file.is_none());
                assert_eq!(args.field, ModelField::ModelMask);
                assert_eq!(args.output.format, VtkFormat::Xml);
                assert!(args.x.is_none() && args.y.is_none() && args.z.is_none());
            }
            _ => panic!("expected the model command"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn model_options() {
        let cli = Cli::try_parse_from([
            "layerview",
            "model",
            "data.json",
            "--field",
            "model",
            "-z",
            "-250",
            "--cumulative",
            "--format",
            "legacy-ascii",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Command::Model(args) => {
                assert_eq!(args.file, Some(PathBuf::from("data.json")));
                assert_eq!(args.field, ModelField::Model);
                assert_eq!(args.z, Some(-250.0));
                assert!(args.cumulative);
                assert_eq!(args.output.format, VtkFormat::LegacyAscii);
            }
            _ => panic!("expected the model command"),
        }
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn clip_order_is_documented() {
        let cli = Cli::command();
        let model = cli.find_subcommand("model").unwrap();
        for name in ["x", "y", "z"] {
            let arg = model.get_arguments().find(|a| a.get_id() == name).unwrap();
            let help = arg.get_long_help().unwrap().to_string();
            assert!(help.contains("x, y, z order"), "{name}: {help}");
        }
    }

    #[test]
    fn section_commands() {
        let cli = Cli::try_parse_from(["layerview", "model2d", "-o", "section"]).unwrap();
        assert!(matches!(cli.command, Command::Model2d(_)));

        let cli = Cli::try_parse_from(["layerview", "-q", "legacy"]).unwrap();
        assert!(matches!(cli.command, Command::Legacy(_)));
        assert!(cli.quiet);
    }
}
