use foundation::math::{Projection, SphericalProjection, Vec2, Vec3};
use formats::{Feature, FeatureCollection};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::layer::{Layer, LayerId, LayerKind};
use crate::mesh::{GridConfig, MeshBuffers, MeshError, PolygonMesher, Triangulation, assemble};

/// How polygon holes are treated on the globe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HoleMode {
    /// Holes are cut out of their polygon.
    #[default]
    Subtract,
    /// Every ring, holes included, is meshed as its own filled ring.
    AsRings,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeConfig {
    pub radius: f64,
    /// Outlines sit this far above the surface to avoid z-fighting.
    pub edge_lift: f64,
    pub grid: GridConfig,
    pub holes: HoleMode,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            edge_lift: 0.0001,
            grid: GridConfig::default(),
            holes: HoleMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryMesh {
    pub name: Option<String>,
    pub properties: Map<String, Value>,
    pub mesh: MeshBuffers,
    pub edges: Vec<Vec<Vec3>>,
    pub label_anchor: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    pub index: usize,
    pub name: Option<String>,
    pub error: MeshError,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GlobeSnapshot {
    pub countries: Vec<CountryMesh>,
    pub skipped: Vec<SkippedFeature>,
}

impl GlobeSnapshot {
    pub fn vertex_count(&self) -> usize {
        self.countries.iter().map(|c| c.mesh.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.countries.iter().map(|c| c.mesh.triangle_count()).sum()
    }

    pub fn country(&self, name: &str) -> Option<&CountryMesh> {
        self.countries
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }
}

/// Country polygons draped over a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryLayer {
    id: LayerId,
    config: GlobeConfig,
}

impl CountryLayer {
    pub fn new(id: u64, config: GlobeConfig) -> Self {
        Self {
            id: LayerId(id),
            config,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn build(&self, collection: &FeatureCollection) -> GlobeSnapshot {
        let mut out = GlobeSnapshot::default();
        for (index, feature) in collection.features.iter().enumerate() {
            match self.build_feature(feature) {
                Ok(country) => out.countries.push(country),
                Err(error) => {
                    let name = feature.name().map(str::to_owned);
                    warn!(index, name = ?name, %error, "skipping feature on globe");
                    out.skipped.push(SkippedFeature { index, name, error });
                }
            }
        }
        debug!(
            countries = out.countries.len(),
            skipped = out.skipped.len(),
            vertices = out.vertex_count(),
            triangles = out.triangle_count(),
            "built globe layer"
        );
        out
    }

    pub fn build_feature(&self, feature: &Feature) -> Result<CountryMesh, MeshError> {
        let mesher = PolygonMesher::new(self.config.grid);
        let mut parts: Vec<Triangulation> = Vec::new();
        for polygon in feature.geometry.polygons() {
            match self.config.holes {
                HoleMode::Subtract => parts.push(mesher.triangulate_polygon(polygon)?),
                HoleMode::AsRings => {
                    for ring in polygon {
                        parts.push(mesher.triangulate_ring(ring)?);
                    }
                }
            }
        }
        if parts.is_empty() {
            return Err(MeshError::EmptyPolygon);
        }

        let surface = SphericalProjection::new(self.config.radius);
        let mesh = assemble(&parts, &surface);

        let lifted = SphericalProjection::new(self.config.radius + self.config.edge_lift);
        let edges = feature
            .geometry
            .polygons()
            .into_iter()
            .flatten()
            .map(|ring| ring.iter().map(|&p| lifted.project(p)).collect())
            .collect();

        let label_anchor = match center_property(&feature.properties) {
            Some(center) => surface.project(center),
            None => mesh.bounds().map(|b| b.center()).unwrap_or(Vec3::ZERO),
        };

        Ok(CountryMesh {
            name: feature.name().map(str::to_owned),
            properties: feature.properties.clone(),
            mesh,
            edges,
            label_anchor,
        })
    }
}

fn center_property(properties: &Map<String, Value>) -> Option<Vec2> {
    let center = properties.get("center")?.as_array()?;
    match center.as_slice() {
        [lon, lat, ..] => Some(Vec2::new(lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

impl Layer for CountryLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Globe
    }
}
