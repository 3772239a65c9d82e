//! Decoder for ECharts' compressed GeoJSON variant.
//!
//! Map files shipped with older ECharts releases (e.g. `map/json/world.json`)
//! set `"UTF8Encoding": true` and store each ring as a string. Every pair of
//! UTF-16 code units is one zig-zag encoded `(dx, dy)` delta, offset by 64,
//! starting from the ring's `encodeOffsets` entry. Coordinates are the running
//! sums divided by `UTF8Scale` (1024 when absent).

use serde_json::{json, Map, Value};
use thiserror::Error;

const DEFAULT_SCALE: f64 = 1024.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("feature {index}: missing encodeOffsets")]
    MissingOffsets { index: usize },

    #[error("feature {index}: malformed {kind} geometry")]
    Malformed { index: usize, kind: String },
}

/// True when the document uses the compressed encoding.
pub fn is_encoded(doc: &Value) -> bool {
    doc.get("UTF8Encoding")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Decode all feature geometries in place and clear the encoding flag.
///
/// Documents that are not encoded are left untouched.
pub fn decode_in_place(doc: &mut Value) -> Result<(), DecodeError> {
    if !is_encoded(doc) {
        return Ok(());
    }
    let scale = doc
        .get("UTF8Scale")
        .and_then(Value::as_f64)
        .filter(|s| *s != 0.0)
        .unwrap_or(DEFAULT_SCALE);

    if let Some(features) = doc.get_mut("features").and_then(Value::as_array_mut) {
        for (index, feature) in features.iter_mut().enumerate() {
            if let Some(geometry) = feature.get_mut("geometry").and_then(Value::as_object_mut) {
                decode_geometry(geometry, scale, index)?;
            }
        }
    }

    if let Some(obj) = doc.as_object_mut() {
        obj.insert("UTF8Encoding".into(), Value::Bool(false));
        obj.remove("UTF8Scale");
    }
    Ok(())
}

fn decode_geometry(
    geometry: &mut Map<String, Value>,
    scale: f64,
    index: usize,
) -> Result<(), DecodeError> {
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let offsets = geometry
        .remove("encodeOffsets")
        .ok_or(DecodeError::MissingOffsets { index })?;
    let malformed = || DecodeError::Malformed {
        index,
        kind: kind.clone(),
    };
    let coordinates = geometry.get_mut("coordinates").ok_or_else(malformed)?;

    match kind.as_str() {
        "LineString" => {
            let decoded = decode_ring(coordinates, &offsets, scale).ok_or_else(malformed)?;
            *coordinates = decoded;
        }
        "Polygon" | "MultiLineString" => {
            decode_rings(coordinates, &offsets, scale).ok_or_else(malformed)?;
        }
        "MultiPolygon" => {
            let polygons = coordinates.as_array_mut().ok_or_else(malformed)?;
            let offsets = offsets.as_array().ok_or_else(malformed)?;
            for (polygon, polygon_offsets) in polygons.iter_mut().zip(offsets) {
                decode_rings(polygon, polygon_offsets, scale).ok_or_else(malformed)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn decode_rings(rings: &mut Value, offsets: &Value, scale: f64) -> Option<()> {
    let rings = rings.as_array_mut()?;
    let offsets = offsets.as_array()?;
    for (ring, offset) in rings.iter_mut().zip(offsets) {
        let decoded = decode_ring(ring, offset, scale)?;
        *ring = decoded;
    }
    Some(())
}

/// Decode one ring. Rings that are already coordinate arrays pass through.
fn decode_ring(ring: &Value, offset: &Value, scale: f64) -> Option<Value> {
    let encoded = match ring {
        Value::String(s) => s,
        Value::Array(_) => return Some(ring.clone()),
        _ => return None,
    };
    let offset = offset.as_array()?;
    let mut x = offset.first()?.as_f64()? as i64;
    let mut y = offset.get(1)?.as_f64()? as i64;

    let units: Vec<u16> = encoded.encode_utf16().collect();
    let points = units
        .chunks_exact(2)
        .map(|pair| {
            x += unzigzag(pair[0]);
            y += unzigzag(pair[1]);
            json!([x as f64 / scale, y as f64 / scale])
        })
        .collect();
    Some(Value::Array(points))
}

fn unzigzag(unit: u16) -> i64 {
    let v = unit as i64 - 64;
    (v >> 1) ^ -(v & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_documents_are_untouched() {
        let mut doc = json!({"type": "FeatureCollection", "features": []});
        let before = doc.clone();
        decode_in_place(&mut doc).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn decodes_zigzag_deltas() {
        // 'F' = 70 -> +3, 'C' = 67 -> -2, 'B' = 66 -> +1
        let mut doc = json!({
            "UTF8Encoding": true,
            "UTF8Scale": 1,
            "features": [{
                "type": "Feature",
                "properties": {"name": "A"},
                "geometry": {
                    "type": "Polygon",
                    "encodeOffsets": [[100, 200]],
                    "coordinates": ["FCBB"]
                }
            }]
        });
        decode_in_place(&mut doc).unwrap();

        assert_eq!(doc["UTF8Encoding"], false);
        let ring = &doc["features"][0]["geometry"]["coordinates"][0];
        assert_eq!(ring, &json!([[103.0, 198.0], [104.0, 199.0]]));
        assert!(doc["features"][0]["geometry"].get("encodeOffsets").is_none());
    }

    #[test]
    fn decodes_multipolygon_with_default_scale() {
        let mut doc = json!({
            "UTF8Encoding": true,
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "encodeOffsets": [[[1024, 2048]], [[0, 0]]],
                    "coordinates": [["@@"], ["BB"]]
                }
            }]
        });
        decode_in_place(&mut doc).unwrap();
        let coords = &doc["features"][0]["geometry"]["coordinates"];
        assert_eq!(coords[0][0], json!([[1.0, 2.0]]));
        assert_eq!(coords[1][0], json!([[1.0 / 1024.0, 1.0 / 1024.0]]));
    }

    #[test]
    fn missing_offsets_is_an_error() {
        let mut doc = json!({
            "UTF8Encoding": true,
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": ["@@"]}
            }]
        });
        assert_eq!(
            decode_in_place(&mut doc),
            Err(DecodeError::MissingOffsets { index: 0 })
        );
    }
}
