//! Conversion of contour results to GeoJSON features.
//!
//! Isoband results become `MultiPolygon` features carrying their level
//! pair; isoline results become `MultiLineString` features carrying their
//! level. The collection builders drop empty results so a threshold sweep
//! yields only features with geometry.

use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, Position, Value};
use num_traits::Float;

use crate::paths::Paths;

fn position<T: Float>(x: T, y: T) -> Position {
    vec![
        x.to_f64().unwrap_or(f64::NAN),
        y.to_f64().unwrap_or(f64::NAN),
    ]
}

fn feature_with_geometry(value: Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    }
}

/// Convert one isoband result to a `MultiPolygon` feature.
///
/// Each ring becomes its own polygon without hole annotation. Rings are
/// closed explicitly because GeoJSON requires the first and last position
/// of a linear ring to coincide.
pub fn band_feature<T: Float>(paths: &Paths<T>, lower: f64, upper: f64) -> Feature {
    let polygons: Vec<Vec<Vec<Position>>> = paths
        .paths()
        .map(|path| {
            let mut ring: Vec<Position> = path
                .x
                .iter()
                .zip(path.y)
                .map(|(&px, &py)| position(px, py))
                .collect();
            if let Some(first) = ring.first().cloned() {
                ring.push(first);
            }
            vec![ring]
        })
        .collect();

    let mut feature = feature_with_geometry(Value::MultiPolygon(polygons));
    if let Some(props) = feature.properties.as_mut() {
        props.insert("lower_level".to_string(), serde_json::json!(lower));
        props.insert("upper_level".to_string(), serde_json::json!(upper));
    }
    feature
}

/// Convert one isoline result to a `MultiLineString` feature.
pub fn line_feature<T: Float>(paths: &Paths<T>, isovalue: f64) -> Feature {
    let lines: Vec<Vec<Position>> = paths
        .paths()
        .map(|path| {
            path.x
                .iter()
                .zip(path.y)
                .map(|(&px, &py)| position(px, py))
                .collect()
        })
        .collect();

    let mut feature = feature_with_geometry(Value::MultiLineString(lines));
    if let Some(props) = feature.properties.as_mut() {
        props.insert("isovalue".to_string(), serde_json::json!(isovalue));
    }
    feature
}

/// Build a `FeatureCollection` from a band sweep, skipping empty bands.
pub fn band_collection<T: Float>(
    results: &[Paths<T>],
    lower: &[T],
    upper: &[T],
) -> FeatureCollection {
    let features = results
        .iter()
        .zip(lower.iter().zip(upper))
        .filter(|(paths, _)| !paths.is_empty())
        .map(|(paths, (&lo, &hi))| {
            band_feature(
                paths,
                lo.to_f64().unwrap_or(f64::NAN),
                hi.to_f64().unwrap_or(f64::NAN),
            )
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Build a `FeatureCollection` from an isoline sweep, skipping empty
/// levels.
pub fn line_collection<T: Float>(results: &[Paths<T>], values: &[T]) -> FeatureCollection {
    let features = results
        .iter()
        .zip(values)
        .filter(|(paths, _)| !paths.is_empty())
        .map(|(paths, &v)| line_feature(paths, v.to_f64().unwrap_or(f64::NAN)))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paths() -> Paths<f64> {
        let mut paths = Paths::new();
        paths.push(0.0, 0.0, 1);
        paths.push(1.0, 0.0, 1);
        paths.push(1.0, 1.0, 1);
        paths
    }

    #[test]
    fn test_band_feature_closes_rings() {
        let feature = band_feature(&sample_paths(), 0.5, 1.5);
        match feature.geometry.unwrap().value {
            Value::MultiPolygon(polygons) => {
                assert_eq!(polygons.len(), 1);
                let ring = &polygons[0][0];
                assert_eq!(ring.len(), 4);
                assert_eq!(ring.first(), ring.last());
            }
            other => panic!("expected MultiPolygon, got {:?}", other),
        }

        let props = feature.properties.unwrap();
        assert_eq!(props.get("lower_level").unwrap(), &serde_json::json!(0.5));
        assert_eq!(props.get("upper_level").unwrap(), &serde_json::json!(1.5));
    }

    #[test]
    fn test_line_feature_keeps_lines_open() {
        let feature = line_feature(&sample_paths(), 2.0);
        match feature.geometry.unwrap().value {
            Value::MultiLineString(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].len(), 3);
            }
            other => panic!("expected MultiLineString, got {:?}", other),
        }
    }

    #[test]
    fn test_collections_skip_empty_results() {
        let results = vec![sample_paths(), Paths::new()];
        let collection = line_collection(&results, &[1.0, 2.0]);
        assert_eq!(collection.features.len(), 1);

        let collection = band_collection(&results, &[0.0, 1.0], &[1.0, 2.0]);
        assert_eq!(collection.features.len(), 1);
    }
}
