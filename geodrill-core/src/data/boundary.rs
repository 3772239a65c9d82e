//! Parsed boundary geometry for one region.
//!
//! Only polygon outlines are kept: each feature carries its name (read from
//! the region's configured property) and its rings as `(lon, lat)` pairs.

use geojson::{Feature, GeoJson, Geometry, Value as GeoValue};
use serde::Serialize;
use serde_json::Value;

use super::echarts;

/// A closed ring of `(lon, lat)` points.
pub type Ring = Vec<(f64, f64)>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryFeature {
    /// Name from the configured property; `None` when the property is absent.
    pub name: Option<String>,
    pub rings: Vec<Ring>,
}

impl BoundaryFeature {
    /// Bounding-box center of all rings, used to place labels.
    pub fn label_point(&self) -> Option<(f64, f64)> {
        Bounds::of_rings(&self.rings).map(|b| b.center())
    }
}

/// Axis-aligned bounding box in lon/lat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of_rings<'a>(rings: impl IntoIterator<Item = &'a Ring>) -> Option<Self> {
        let mut points = rings.into_iter().flatten();
        let &(x, y) = points.next()?;
        let start = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        Some(points.fold(start, |b, &(x, y)| Bounds {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        }))
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryData {
    pub features: Vec<BoundaryFeature>,
    pub bounds: Option<Bounds>,
}

impl BoundaryData {
    /// Parse a GeoJSON (or ECharts-encoded GeoJSON) document.
    ///
    /// `name_property` is the feature property holding the display name.
    pub fn parse(text: &str, name_property: &str) -> Result<Self, String> {
        let mut doc: Value = serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}"))?;
        echarts::decode_in_place(&mut doc).map_err(|e| e.to_string())?;
        let geojson = GeoJson::from_json_value(doc).map_err(|e| format!("invalid GeoJSON: {e}"))?;

        let features: Vec<BoundaryFeature> = match geojson {
            GeoJson::FeatureCollection(fc) => fc
                .features
                .iter()
                .map(|f| to_feature(f, name_property))
                .collect(),
            GeoJson::Feature(f) => vec![to_feature(&f, name_property)],
            GeoJson::Geometry(_) => {
                return Err("expected a Feature or FeatureCollection, found a bare geometry".into())
            }
        };

        let bounds = Bounds::of_rings(features.iter().flat_map(|f| f.rings.iter()));
        Ok(Self { features, bounds })
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Feature names in document order, skipping unnamed features.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().filter_map(|f| f.name.as_deref())
    }

    pub fn find(&self, name: &str) -> Option<&BoundaryFeature> {
        self.features
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }
}

fn to_feature(feature: &Feature, name_property: &str) -> BoundaryFeature {
    let name = feature.property(name_property).and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let mut rings = Vec::new();
    if let Some(geometry) = &feature.geometry {
        collect_rings(geometry, &mut rings);
    }
    BoundaryFeature { name, rings }
}

fn collect_rings(geometry: &Geometry, out: &mut Vec<Ring>) {
    match &geometry.value {
        GeoValue::Polygon(polygon) => out.extend(polygon.iter().map(|r| to_ring(r))),
        GeoValue::MultiPolygon(polygons) => {
            for polygon in polygons {
                out.extend(polygon.iter().map(|r| to_ring(r)));
            }
        }
        GeoValue::GeometryCollection(geometries) => {
            for g in geometries {
                collect_rings(g, out);
            }
        }
        _ => {}
    }
}

fn to_ring(positions: &[Vec<f64>]) -> Ring {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[0], p[1]))
        .collect()
}
