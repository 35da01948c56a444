//! Region membership filter.
//!
//! # Data layout
//!
//! Each polygon is stored once in an R-tree (via `rstar`) keyed by its
//! bounding box.  A membership query first collects the polygons whose box
//! contains the point, then runs the exact covers test (`geo::Intersects`,
//! boundary inclusive) on those candidates only.
//!
//! # Loading
//!
//! Regions come from a CSV file with a `wkt` column holding a POLYGON or
//! MULTIPOLYGON and any number of attribute columns:
//!
//! ```csv
//! wkt,plz,note
//! "POLYGON((0 0,1000 0,1000 1000,0 1000,0 0))",42551,centre
//! ```
//!
//! The caller picks features by attribute (e.g. a fixed set of zip codes)
//! before the filter is built.  Geometries must already be in the same
//! planar CRS as the network and activity coordinates.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use geo::{BoundingRect, Geometry, Intersects, Point, Polygon};
use rstar::{RTree, RTreeObject, AABB};
use wkt::TryFromWkt;

use ms_core::Coord;

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

struct RegionEntry {
    polygon:  Polygon<f64>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

// ── RegionFeature ─────────────────────────────────────────────────────────────

/// One row of a regions file: its geometry plus every other column.
#[derive(Clone, Debug)]
pub struct RegionFeature {
    pub attributes: HashMap<String, String>,
    pub geometry:   Geometry<f64>,
}

impl RegionFeature {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Read every feature from a regions CSV file.
pub fn load_regions_csv(path: &Path) -> SpatialResult<Vec<RegionFeature>> {
    let file = std::fs::File::open(path)?;
    read_regions(file)
}

/// Like [`load_regions_csv`] but accepts any `Read` source.
pub fn read_regions<R: Read>(reader: R) -> SpatialResult<Vec<RegionFeature>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let wkt_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("wkt"))
        .ok_or(SpatialError::MissingColumn("wkt"))?;

    let mut features = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let text = record.get(wkt_col).unwrap_or_default();
        let geometry = Geometry::<f64>::try_from_wkt_str(text).map_err(|e| SpatialError::Wkt {
            row,
            message: e.to_string(),
        })?;
        let attributes = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(col, _)| *col != wkt_col)
            .map(|(_, (name, value))| (name.to_owned(), value.to_owned()))
            .collect();
        features.push(RegionFeature { attributes, geometry });
    }
    Ok(features)
}

// ── SpatialFilter ─────────────────────────────────────────────────────────────

/// Read-only set of polygons answering "is this point inside any of them?".
///
/// Immutable once built and `Send + Sync`, so any number of threads may
/// query it at once without locking.
pub struct SpatialFilter {
    index: RTree<RegionEntry>,
}

impl SpatialFilter {
    /// Build from polygons.  Degenerate polygons with no bounding box are
    /// dropped; they cannot cover any point.
    pub fn new(polygons: impl IntoIterator<Item = Polygon<f64>>) -> Self {
        let entries: Vec<RegionEntry> = polygons
            .into_iter()
            .filter_map(|polygon| {
                let rect = polygon.bounding_rect()?;
                let envelope = AABB::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                Some(RegionEntry { polygon, envelope })
            })
            .collect();
        Self { index: RTree::bulk_load(entries) }
    }

    /// Build from arbitrary geometries.  Every geometry must be polygonal
    /// (POLYGON, MULTIPOLYGON, RECT, TRIANGLE); anything else fails the
    /// whole build.
    pub fn from_geometries(
        geometries: impl IntoIterator<Item = Geometry<f64>>,
    ) -> SpatialResult<Self> {
        let mut polygons = Vec::new();
        for (index, geometry) in geometries.into_iter().enumerate() {
            match geometry {
                Geometry::Polygon(p)      => polygons.push(p),
                Geometry::MultiPolygon(m) => polygons.extend(m.0),
                Geometry::Rect(r)         => polygons.push(r.to_polygon()),
                Geometry::Triangle(t)     => polygons.push(t.to_polygon()),
                other => {
                    return Err(SpatialError::NotPolygonal { index, kind: kind_name(&other) });
                }
            }
        }
        Ok(Self::new(polygons))
    }

    /// Build from the features `keep` accepts.
    pub fn from_features<P>(features: Vec<RegionFeature>, keep: P) -> SpatialResult<Self>
    where
        P: Fn(&RegionFeature) -> bool,
    {
        let total = features.len();
        let kept: Vec<Geometry<f64>> = features
            .into_iter()
            .filter(|f| keep(f))
            .map(|f| f.geometry)
            .collect();
        log::info!("region filter: kept {} of {} features", kept.len(), total);
        let filter = Self::from_geometries(kept)?;
        if filter.is_empty() {
            log::warn!("region filter is empty; no point will be inside it");
        }
        Ok(filter)
    }

    /// `true` iff any polygon covers `point`.  Points on a boundary count as
    /// inside.
    pub fn contains(&self, point: Coord) -> bool {
        let p = Point::new(point.x, point.y);
        self.index
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .any(|entry| entry.polygon.intersects(&p))
    }

    /// Number of polygons (multipolygons count once per part).
    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_)              => "POINT",
        Geometry::Line(_)               => "LINE",
        Geometry::LineString(_)         => "LINESTRING",
        Geometry::Polygon(_)            => "POLYGON",
        Geometry::MultiPoint(_)         => "MULTIPOINT",
        Geometry::MultiLineString(_)    => "MULTILINESTRING",
        Geometry::MultiPolygon(_)       => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_)               => "RECT",
        Geometry::Triangle(_)           => "TRIANGLE",
    }
}
