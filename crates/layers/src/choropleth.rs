use foundation::bounds::Aabb3;
use foundation::math::{Vec2, Vec3};
use formats::{Feature, FeatureCollection};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::globe::SkippedFeature;
use crate::layer::{Layer, LayerId, LayerKind};
use crate::mesh::{MeshBuffers, MeshError, extrude_polygon, flat_polygon};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapConfig {
    /// `None` draws flat regions on `z = 0`.
    pub extrude_height: Option<f64>,
    pub outline_lift: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            extrude_height: None,
            outline_lift: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionMesh {
    pub name: Option<String>,
    pub properties: Map<String, Value>,
    pub mesh: MeshBuffers,
    pub outlines: Vec<Vec<Vec3>>,
}

/// Camera placement that fits a whole map in view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Framing {
    pub target: Vec3,
    pub eye: Vec3,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapSnapshot {
    pub regions: Vec<RegionMesh>,
    pub skipped: Vec<SkippedFeature>,
}

impl MapSnapshot {
    pub fn vertex_count(&self) -> usize {
        self.regions.iter().map(|r| r.mesh.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.regions.iter().map(|r| r.mesh.triangle_count()).sum()
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        self.regions
            .iter()
            .filter_map(|r| r.mesh.bounds())
            .reduce(Aabb3::union)
    }

    /// Looks down the Z axis at the map centre from a distance equal to the
    /// map width.
    pub fn framing(&self) -> Option<Framing> {
        let bounds = self.bounds()?;
        let centre = bounds.center();
        let size = bounds.size();
        Some(Framing {
            target: Vec3::new(centre.x, centre.y, 0.0),
            eye: Vec3::new(centre.x, centre.y, size.x),
        })
    }
}

/// Flat or extruded choropleth over planar coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    id: LayerId,
    config: MapConfig,
}

impl MapLayer {
    pub fn new(id: u64, config: MapConfig) -> Self {
        Self {
            id: LayerId(id),
            config,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn build(&self, collection: &FeatureCollection) -> MapSnapshot {
        let mut out = MapSnapshot::default();
        for (index, feature) in collection.features.iter().enumerate() {
            match self.build_feature(feature) {
                Ok(region) => out.regions.push(region),
                Err(error) => {
                    let name = feature.name().map(str::to_owned);
                    warn!(index, name = ?name, %error, "skipping feature on map");
                    out.skipped.push(SkippedFeature { index, name, error });
                }
            }
        }
        debug!(
            regions = out.regions.len(),
            skipped = out.skipped.len(),
            triangles = out.triangle_count(),
            "built map layer"
        );
        out
    }

    pub fn build_feature(&self, feature: &Feature) -> Result<RegionMesh, MeshError> {
        let lift = self.config.outline_lift;
        let mut mesh = MeshBuffers::default();
        let mut outlines = Vec::new();
        for polygon in feature.geometry.polygons() {
            let part = match self.config.extrude_height {
                Some(height) => extrude_polygon(polygon, height)?,
                None => flat_polygon(polygon, 0.0)?,
            };
            mesh.append(&part);

            let Some(outer) = polygon.first() else {
                continue;
            };
            match self.config.extrude_height {
                Some(height) => {
                    outlines.push(outline(outer, -lift));
                    outlines.push(outline(outer, height + lift));
                }
                None => outlines.push(outline(outer, lift)),
            }
        }
        if mesh.is_empty() {
            return Err(MeshError::EmptyPolygon);
        }

        Ok(RegionMesh {
            name: feature.name().map(str::to_owned),
            properties: feature.properties.clone(),
            mesh,
            outlines,
        })
    }
}

fn outline(ring: &[Vec2], z: f64) -> Vec<Vec3> {
    ring.iter().map(|p| Vec3::new(p.x, p.y, z)).collect()
}

impl Layer for MapLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Choropleth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> FeatureCollection {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../formats/assets/countries.json");
        let payload = std::fs::read_to_string(path).expect("read fixture");
        FeatureCollection::from_geojson_str(&payload).expect("parse fixture")
    }

    #[test]
    fn flat_map_bounds_and_framing() {
        let snap = MapLayer::new(1, MapConfig::default()).build(&fixture());
        assert!(snap.skipped.is_empty());
        assert_eq!(snap.regions.len(), 3);

        let bounds = snap.bounds().unwrap();
        assert_eq!(bounds.min, [-20.0, -20.0, 0.0]);
        assert_eq!(bounds.max, [36.0, 10.0, 0.0]);

        let framing = snap.framing().unwrap();
        assert_eq!(framing.target, Vec3::new(8.0, -5.0, 0.0));
        assert_eq!(framing.eye, Vec3::new(8.0, -5.0, 56.0));

        let square = &snap.regions[0];
        assert_eq!(square.mesh.triangle_count(), 2);
        assert_eq!(square.outlines.len(), 1);
        assert!(square.outlines[0].iter().all(|p| p.z == 0.001));
    }

    #[test]
    fn extruded_map_has_two_outlines_per_polygon() {
        let layer = MapLayer::new(
            2,
            MapConfig {
                extrude_height: Some(2.0),
                ..MapConfig::default()
            },
        );
        let snap = layer.build(&fixture());
        let islands = &snap.regions[1];
        assert_eq!(islands.outlines.len(), 4);
        assert!((islands.outlines[1][0].z - 2.001).abs() < 1e-12);
        assert_eq!(snap.bounds().unwrap().max[2], 2.0);
        // Square: 2 + 2 caps, 4 walls of two triangles.
        assert_eq!(snap.regions[0].mesh.triangle_count(), 12);
    }

    #[test]
    fn empty_polygon_list_is_skipped() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "name": "nothing" },
                "geometry": { "type": "MultiPolygon", "coordinates": [] }
            }]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).unwrap();
        let layer = MapLayer::new(3, MapConfig::default());
        let snap = layer.build(&fc);
        assert!(snap.regions.is_empty());
        assert_eq!(snap.skipped[0].error, MeshError::EmptyPolygon);
        assert_eq!(snap.bounds(), None);
        assert_eq!(layer.kind(), LayerKind::Choropleth);
    }
}
