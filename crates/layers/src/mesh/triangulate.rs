use foundation::math::Vec2;
use tracing::debug;

use super::delaunay;
use super::error::MeshError;
use super::pip;

/// Planar triangles over a point set, indices counter-clockwise in source
/// coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub positions: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Triangulation {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| delaunay::orient2d(a, b, c) * 0.5)
            .sum()
    }
}

/// Triangulates `interior` followed by `boundary` and keeps only the
/// triangles whose centroid lies inside `ring`.
pub fn triangulate(
    boundary: &[Vec2],
    interior: &[Vec2],
    ring: &[Vec2],
) -> Result<Triangulation, MeshError> {
    triangulate_with_holes(boundary, interior, ring, &[])
}

/// As [`triangulate`], additionally dropping triangles whose centroid falls
/// inside any of `holes`.
pub fn triangulate_with_holes(
    boundary: &[Vec2],
    interior: &[Vec2],
    outer: &[Vec2],
    holes: &[&[Vec2]],
) -> Result<Triangulation, MeshError> {
    let mut positions = Vec::with_capacity(interior.len() + boundary.len());
    positions.extend_from_slice(interior);
    positions.extend_from_slice(boundary);

    if let Some(index) = positions
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(MeshError::NonFiniteCoordinate { index });
    }
    let distinct = distinct_count(&positions);
    if distinct < 3 {
        return Err(MeshError::TooFewPoints { got: distinct });
    }

    let candidates = delaunay::triangulate(&positions);
    let mut indices = Vec::with_capacity(candidates.len() * 3);
    let mut dropped = 0usize;
    for [a, b, c] in &candidates {
        let centroid = Vec2::new(
            (positions[*a].x + positions[*b].x + positions[*c].x) / 3.0,
            (positions[*a].y + positions[*b].y + positions[*c].y) / 3.0,
        );
        let keep = pip::contains(centroid, outer)
            && !holes.iter().any(|hole| pip::contains(centroid, hole));
        if keep {
            indices.extend([*a as u32, *b as u32, *c as u32]);
        } else {
            dropped += 1;
        }
    }
    debug!(
        points = positions.len(),
        kept = indices.len() / 3,
        dropped,
        "triangulated ring"
    );

    Ok(Triangulation { positions, indices })
}

fn distinct_count(points: &[Vec2]) -> usize {
    let mut keys: Vec<(u64, u64)> = points
        .iter()
        .map(|p| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}
