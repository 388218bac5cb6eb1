use formats::FeatureCollection;
use foundation::bounds::Aabb3;
use layers::globe::SkippedFeature;
use layers::mesh::GridConfig;
use layers::{CountryLayer, GlobeConfig, MapConfig, MapLayer};
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeshTarget {
    Globe { radius: f64 },
    Flat,
    Extrude { height: f64 },
}

impl MeshTarget {
    fn label(&self) -> &'static str {
        match self {
            MeshTarget::Globe { .. } => "globe",
            MeshTarget::Flat => "flat",
            MeshTarget::Extrude { .. } => "extrude",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureReport {
    pub name: Option<String>,
    pub vertices: usize,
    pub triangles: usize,
    pub outlines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedReport {
    pub index: usize,
    pub name: Option<String>,
    pub error: String,
}

impl From<&SkippedFeature> for SkippedReport {
    fn from(s: &SkippedFeature) -> Self {
        Self {
            index: s.index,
            name: s.name.clone(),
            error: s.error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundsReport {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl From<Aabb3> for BoundsReport {
    fn from(b: Aabb3) -> Self {
        Self {
            min: b.min,
            max: b.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshReport {
    pub target: &'static str,
    pub vertices: usize,
    pub triangles: usize,
    pub features: Vec<FeatureReport>,
    pub skipped: Vec<SkippedReport>,
    pub bounds: Option<BoundsReport>,
}

type Built = (Vec<FeatureReport>, Vec<SkippedFeature>, Option<Aabb3>);

pub fn build_mesh_report(
    collection: &FeatureCollection,
    target: MeshTarget,
    grid: GridConfig,
) -> MeshReport {
    let (features, skipped, bounds): Built = match target {
        MeshTarget::Globe { radius } => {
            let config = GlobeConfig {
                radius,
                grid,
                ..GlobeConfig::default()
            };
            let snap = CountryLayer::new(1, config).build(collection);
            let features = snap
                .countries
                .iter()
                .map(|c| FeatureReport {
                    name: c.name.clone(),
                    vertices: c.mesh.vertex_count(),
                    triangles: c.mesh.triangle_count(),
                    outlines: c.edges.len(),
                })
                .collect();
            let bounds = snap
                .countries
                .iter()
                .filter_map(|c| c.mesh.bounds())
                .reduce(Aabb3::union);
            (features, snap.skipped, bounds)
        }
        MeshTarget::Flat | MeshTarget::Extrude { .. } => {
            let extrude_height = match target {
                MeshTarget::Extrude { height } => Some(height),
                _ => None,
            };
            let config = MapConfig {
                extrude_height,
                ..MapConfig::default()
            };
            let snap = MapLayer::new(1, config).build(collection);
            let features = snap
                .regions
                .iter()
                .map(|r| FeatureReport {
                    name: r.name.clone(),
                    vertices: r.mesh.vertex_count(),
                    triangles: r.mesh.triangle_count(),
                    outlines: r.outlines.len(),
                })
                .collect();
            let bounds = snap.bounds();
            (features, snap.skipped, bounds)
        }
    };

    MeshReport {
        target: target.label(),
        vertices: features.iter().map(|f| f.vertices).sum(),
        triangles: features.iter().map(|f| f.triangles).sum(),
        features,
        skipped: skipped.iter().map(SkippedReport::from).collect(),
        bounds: bounds.map(BoundsReport::from),
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
    fn flat_report_counts_every_region() {
        let report = build_mesh_report(&fixture(), MeshTarget::Flat, GridConfig::default());
        assert_eq!(report.target, "flat");
        assert_eq!(report.features.len(), 3);
        assert_eq!(report.features[0].triangles, 2);
        assert_eq!(report.features[1].outlines, 2);
        assert!(report.skipped.is_empty());
        let bounds = report.bounds.unwrap();
        assert_eq!(bounds.min, [-20.0, -20.0, 0.0]);
        assert_eq!(bounds.max, [36.0, 10.0, 0.0]);
    }

    #[test]
    fn globe_report_serializes() {
        let report = build_mesh_report(
            &fixture(),
            MeshTarget::Globe { radius: 3.0 },
            GridConfig::fixed(1.0),
        );
        assert_eq!(report.target, "globe");
        assert_eq!(
            report.triangles,
            report.features.iter().map(|f| f.triangles).sum::<usize>()
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["features"][0]["name"], "Squareland");
        assert_eq!(json["skipped"], serde_json::json!([]));
    }

    #[test]
    fn extrude_report_lifts_bounds() {
        let report = build_mesh_report(
            &fixture(),
            MeshTarget::Extrude { height: 1.5 },
            GridConfig::default(),
        );
        assert_eq!(report.target, "extrude");
        assert_eq!(report.bounds.unwrap().max[2], 1.5);
    }
}
