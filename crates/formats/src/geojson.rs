use foundation::math::Vec2;
use serde_json::{Map, Value};

use crate::error::FormatError;

/// Closed boundary as read from the file; a repeated closing point is kept.
pub type Ring = Vec<Vec2>;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// `rings[0]` is the outer boundary, later rings are holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Polygons of this geometry, a single `Polygon` being treated as a
    /// one-element `MultiPolygon`.
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            Geometry::Polygon(rings) => vec![rings.as_slice()],
            Geometry::MultiPolygon(polys) => polys.iter().map(|p| p.as_slice()).collect(),
        }
    }

    pub fn ring_count(&self) -> usize {
        self.polygons().iter().map(|p| p.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

impl Feature {
    /// `properties.name`, falling back to the feature id.
    pub fn name(&self) -> Option<&str> {
        self.properties
            .get("name")
            .and_then(|v| v.as_str())
            .or(self.id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FormatError> {
        let obj = value
            .as_object()
            .ok_or(FormatError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FormatError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val.as_object().ok_or(FormatError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                FormatError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(FormatError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let geometry_val = feat_obj
                .get("geometry")
                .ok_or(FormatError::InvalidFeature {
                    index,
                    reason: "feature missing geometry".to_string(),
                })?;
            let geometry = parse_geometry(geometry_val)
                .map_err(|reason| FormatError::InvalidFeature { index, reason })?;

            features.push(Feature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Geometry::Polygon(parse_polygon(coords)?)),
        "MultiPolygon" => Ok(Geometry::MultiPolygon(parse_multi_polygon(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<Vec2, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [x, y]".to_string());
    }
    let x = arr[0].as_f64().ok_or("x must be a number".to_string())?;
    let y = arr[1].as_f64().ok_or("y must be a number".to_string())?;
    Ok(Vec2::new(x, y))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}
