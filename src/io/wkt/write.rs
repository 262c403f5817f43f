//! WKT/EWKT writing.

use crate::error::DimensionalityError;
use crate::geom::{Dimension, Geometry, Position};

/// WKT/EWKT writer configuration.
///
/// With a target dimension set, geometries must carry exactly the target's
/// axes; narrowing or widening is an error rather than a silent conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WktWriter {
    dimension: Option<Dimension>,
    srid: Option<i32>,
}

impl WktWriter {
    #[inline] pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Emit an EWKT `SRID=<n>;` prefix on the outermost geometry.
    #[inline]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    #[inline] pub fn dimension(&self) -> Option<Dimension> { self.dimension }

    #[inline] pub fn srid(&self) -> Option<i32> { self.srid }

    pub fn write(&self, geometry: &Geometry) -> Result<String, DimensionalityError> {
        let mut out = String::new();
        self.write_into(geometry, &mut out, true)?;
        Ok(out)
    }

    /// Layout to write `geometry` with, after checking it against the target.
    fn resolve(&self, geometry: &Geometry) -> Result<Dimension, DimensionalityError> {
        let actual = geometry.dimension();
        match self.dimension {
            None => Ok(actual),
            Some(target) if geometry.is_empty() => Ok(target),
            Some(target) => check(actual, target).map(|()| target),
        }
    }

    fn write_into(&self, geometry: &Geometry, out: &mut String, emit_srid: bool) -> Result<(), DimensionalityError> {
        let dim = self.resolve(geometry)?;

        if emit_srid {
            if let Some(srid) = self.srid {
                out.push_str(&format!("SRID={srid};"));
            }
        }
        out.push_str(geometry.kind().keyword());
        if dim != Dimension::Xy {
            out.push(' ');
            out.push_str(dim.marker());
        }
        if geometry.is_empty() {
            out.push_str(" EMPTY");
            return Ok(());
        }

        match geometry {
            Geometry::Point(point) => {
                out.push('(');
                write_position(point.position(), dim, out)?;
                out.push(')');
            }
            Geometry::LineString(line) => write_path(line.positions(), dim, out)?,
            Geometry::MultiPoint(points) => write_path(points.positions(), dim, out)?,
            Geometry::Polygon(polygon) => write_rings(polygon.rings(), dim, out)?,
            Geometry::MultiLineString(lines) => {
                write_list(lines.lines(), out, |line, out| write_path(line.positions(), dim, out))?
            }
            Geometry::MultiPolygon(polygons) => {
                write_list(polygons.polygons(), out, |polygon, out| write_rings(polygon.rings(), dim, out))?
            }
            Geometry::GeometryCollection(collection) => {
                // Members share the collection's layout and never repeat the SRID.
                let member_writer = WktWriter { dimension: Some(dim), srid: None };
                write_list(collection.geometries(), out, |member, out| member_writer.write_into(member, out, false))?
            }
        }
        Ok(())
    }
}

fn check(actual: Dimension, target: Dimension) -> Result<(), DimensionalityError> {
    if (actual.has_z() && !target.has_z()) || (actual.has_m() && !target.has_m()) {
        return Err(DimensionalityError::Exceeds { actual, target });
    }
    if target.has_z() && !actual.has_z() {
        return Err(DimensionalityError::MissingAxis { axis: 'Z', actual, target });
    }
    if target.has_m() && !actual.has_m() {
        return Err(DimensionalityError::MissingAxis { axis: 'M', actual, target });
    }
    Ok(())
}

fn push_number(value: f64, out: &mut String) { out.push_str(&value.to_string()) }

/// `lon lat[ alt][ measure]`
fn write_position(position: &Position, dim: Dimension, out: &mut String) -> Result<(), DimensionalityError> {
    check(position.dimension(), dim)?;
    push_number(position.longitude, out);
    out.push(' ');
    push_number(position.latitude, out);
    for value in [position.altitude, position.measure].into_iter().flatten() {
        out.push(' ');
        push_number(value, out);
    }
    Ok(())
}

/// `( item,item,... )`
fn write_list<T>(
    items: &[T],
    out: &mut String,
    mut write_item: impl FnMut(&T, &mut String) -> Result<(), DimensionalityError>,
) -> Result<(), DimensionalityError> {
    out.push('(');
    for (i, item) in items.iter().enumerate() {
        if i > 0 { out.push(',') }
        write_item(item, out)?;
    }
    out.push(')');
    Ok(())
}

fn write_path(positions: &[Position], dim: Dimension, out: &mut String) -> Result<(), DimensionalityError> {
    write_list(positions, out, |position, out| write_position(position, dim, out))
}

fn write_rings(rings: &[Vec<Position>], dim: Dimension, out: &mut String) -> Result<(), DimensionalityError> {
    write_list(rings, out, |ring, out| write_path(ring, dim, out))
}
