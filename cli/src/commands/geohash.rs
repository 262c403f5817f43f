use anyhow::{Context, Result};
use geokit::geohash::Geohash;
use serde_json::json;

use crate::cli::GeohashCommand;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::GeohashArgs) -> Result<()> {
    let output = match &args.command {
        GeohashCommand::Encode { longitude, latitude, precision } => {
            let hash = Geohash::encode(*longitude, *latitude, *precision);
            json!({ "geohash": hash.as_str(), "precision": hash.precision() })
        }
        GeohashCommand::Decode { hash } => {
            let hash: Geohash = hash.parse().context("[geohash::decode] invalid geohash")?;
            let bounds = hash.bounds();
            let center = hash.center();
            json!({
                "geohash": hash.as_str(),
                "bounds": bounds.bounds(),
                "center": [center.longitude, center.latitude],
            })
        }
        GeohashCommand::Neighbors { hash } => {
            let hash: Geohash = hash.parse().context("[geohash::neighbors] invalid geohash")?;
            let [n, ne, e, se, s, sw, w, nw] = hash.neighbors().context("[geohash::neighbors] adjacency failed")?;
            json!({
                "geohash": hash.as_str(),
                "n": n.as_str(), "ne": ne.as_str(), "e": e.as_str(), "se": se.as_str(),
                "s": s.as_str(), "sw": sw.as_str(), "w": w.as_str(), "nw": nw.as_str(),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
