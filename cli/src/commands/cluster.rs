use std::{fs, time::Instant};

use anyhow::{Context, Result};
use geokit::{ClusterOptions, ClusterOrganizer, Feature, parse_wkt};
use serde::Deserialize;

/// One input record.
#[derive(Deserialize, Debug)]
struct FeatureRecord {
    id: u64,
    wkt: String,
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ClusterArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("[cluster] failed to read {}", args.input.display()))?;
    let records: Vec<FeatureRecord> = serde_json::from_str(&text)
        .with_context(|| format!("[cluster] {} is not a JSON array of {{id, wkt}}", args.input.display()))?;

    let options = ClusterOptions {
        grid_size: args.grid_size,
        zoom: args.zoom,
        use_grid_optimization: !args.linear,
    };
    let mut organizer = ClusterOrganizer::new(options);

    let start = Instant::now();
    let mut skipped = 0usize;
    for record in records {
        let geometry = parse_wkt(&record.wkt).with_context(|| format!("[cluster] feature {}", record.id))?;
        if organizer.add_feature(Feature::new(record.id, geometry)).is_none() { skipped += 1 }
    }
    tracing::info!(
        features = organizer.num_features(),
        clusters = organizer.num_clusters(),
        skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "[cluster] clustered features"
    );

    let clusters: Vec<_> = organizer.clusters().collect();
    println!("{}", serde_json::to_string_pretty(&clusters)?);
    Ok(())
}
