//! Polygon to triangle mesh pipeline: ring validation, interior lattice,
//! Delaunay triangulation with centroid filtering, then projection and
//! normal accumulation.

pub mod assemble;
pub mod delaunay;
pub mod error;
pub mod extrude;
pub mod grid;
pub mod pip;
pub mod ring;
pub mod triangulate;

pub use assemble::{MeshBuffers, assemble};
pub use error::MeshError;
pub use extrude::{extrude_polygon, flat_polygon};
pub use grid::{GridConfig, GridStep};
pub use ring::Ring;
pub use triangulate::{Triangulation, triangulate, triangulate_with_holes};

use foundation::math::{Projection, Vec2};

/// Meshes source-space polygons with an interior lattice so the surface
/// follows curved projections.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolygonMesher {
    pub grid: GridConfig,
}

impl PolygonMesher {
    pub fn new(grid: GridConfig) -> Self {
        Self { grid }
    }

    /// Triangulation of a single ring in source coordinates.
    pub fn triangulate_ring(&self, ring: &[Vec2]) -> Result<Triangulation, MeshError> {
        let ring = Ring::new(ring)?;
        let interior = grid::generate(ring.points(), &self.grid);
        triangulate(ring.points(), &interior, ring.points())
    }

    /// Triangulation of an outer ring with holes. Degenerate holes are
    /// ignored; lattice points inside a hole are discarded.
    pub fn triangulate_polygon(&self, rings: &[Vec<Vec2>]) -> Result<Triangulation, MeshError> {
        let Some((outer, holes)) = rings.split_first() else {
            return Err(MeshError::EmptyPolygon);
        };
        let outer = Ring::new(outer)?;
        let holes: Vec<Ring> = holes.iter().filter_map(|h| Ring::new(h).ok()).collect();
        if holes.is_empty() {
            let interior = grid::generate(outer.points(), &self.grid);
            return triangulate(outer.points(), &interior, outer.points());
        }

        let interior: Vec<Vec2> = grid::generate(outer.points(), &self.grid)
            .into_iter()
            .filter(|p| !holes.iter().any(|h| pip::contains(*p, h.points())))
            .collect();
        let mut boundary = outer.points().to_vec();
        for hole in &holes {
            boundary.extend_from_slice(hole.points());
        }
        let hole_slices: Vec<&[Vec2]> = holes.iter().map(|h| h.points()).collect();
        triangulate_with_holes(&boundary, &interior, outer.points(), &hole_slices)
    }

    pub fn mesh_ring<P: Projection + ?Sized>(
        &self,
        ring: &[Vec2],
        projection: &P,
    ) -> Result<MeshBuffers, MeshError> {
        let t = self.triangulate_ring(ring)?;
        Ok(assemble(&[t], projection))
    }

    pub fn mesh_polygon<P: Projection + ?Sized>(
        &self,
        rings: &[Vec<Vec2>],
        projection: &P,
    ) -> Result<MeshBuffers, MeshError> {
        let t = self.triangulate_polygon(rings)?;
        Ok(assemble(&[t], projection))
    }
}
