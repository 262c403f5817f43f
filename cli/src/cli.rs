use std::path::PathBuf;

use geokit::Dimension;

/// Geometry toolkit CLI
#[derive(clap::Parser, Debug)]
#[command(name = "geokit", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Parse (E)WKT and print it back in canonical form
    Wkt(WktArgs),

    /// Encode, decode or walk geohash cells
    Geohash(GeohashArgs),

    /// Cluster features from a JSON file
    Cluster(ClusterArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum DimensionArg {
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Xy => Dimension::Xy,
            DimensionArg::Xyz => Dimension::Xyz,
            DimensionArg::Xym => Dimension::Xym,
            DimensionArg::Xyzm => Dimension::Xyzm,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct WktArgs {
    /// Geometry text, e.g. "SRID=4326;POINT Z(1 2 3)"
    pub wkt: String,

    /// Output dimensionality (must match the geometry)
    #[arg(short, long, value_enum)]
    pub dimension: Option<DimensionArg>,

    /// SRID for the output prefix, defaults to the embedded one
    #[arg(short, long)]
    pub srid: Option<i32>,

    /// Read three-ordinate tuples without a marker as XYM instead of XYZ
    #[arg(long)]
    pub measured: bool,
}

#[derive(clap::Args, Debug)]
pub struct GeohashArgs {
    #[command(subcommand)]
    pub command: GeohashCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum GeohashCommand {
    /// Encode a longitude/latitude pair
    #[command(allow_negative_numbers = true)]
    Encode {
        longitude: f64,
        latitude: f64,

        /// Number of characters (1..=12)
        #[arg(short, long, default_value_t = 9)]
        precision: usize,
    },

    /// Print the cell bounds and center of a hash
    Decode { hash: String },

    /// Print the eight cells around a hash
    Neighbors { hash: String },
}

#[derive(clap::Args, Debug)]
pub struct ClusterArgs {
    /// JSON array of {"id": <u64>, "wkt": "<geometry>"}
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Join radius in pixels
    #[arg(short, long, default_value_t = 60.0)]
    pub grid_size: f64,

    /// Zoom level
    #[arg(short, long, default_value_t = 0)]
    pub zoom: u8,

    /// Scan every cluster instead of the grid neighborhood
    #[arg(long)]
    pub linear: bool,
}
