use anyhow::{Context, Result};
use geokit::{BoundingBox, Geometry, ThreeOrdinateLayout, WktReader, WktWriter};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::WktArgs) -> Result<()> {
    let layout = if args.measured { ThreeOrdinateLayout::Xym } else { ThreeOrdinateLayout::Xyz };
    let ewkt = WktReader::new()
        .with_three_ordinate_layout(layout)
        .parse(&args.wkt)
        .context("[wkt] failed to parse input")?;
    tracing::info!(kind = %ewkt.geometry.kind(), dimension = %ewkt.geometry.dimension(), "[wkt] parsed geometry");

    let mut writer = WktWriter::new();
    if let Some(dimension) = args.dimension { writer = writer.with_dimension(dimension.into()) }
    if let Some(srid) = args.srid.or(ewkt.srid) { writer = writer.with_srid(srid) }

    let text = writer.write(&ewkt.geometry).context("[wkt] failed to write geometry")?;
    println!("{text}");

    if let Some(bbox) = BoundingBox::of(&ewkt.geometry) {
        let [x_min, y_min, x_max, y_max] = bbox.bounds();
        println!("bbox: {x_min} {y_min} {x_max} {y_max}");
    }
    match &ewkt.geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            println!("area_km2: {}", ewkt.geometry.area());
            println!("perimeter_km: {}", ewkt.geometry.perimeter());
        }
        Geometry::LineString(_) | Geometry::MultiLineString(_) => {
            println!("length_km: {}", ewkt.geometry.length());
        }
        _ => {}
    }

    Ok(())
}
