//! Hole-aware flat and extruded polygon meshes for planar maps.

use earcutr::earcut;
use foundation::math::{Vec2, Vec3};

use super::assemble::MeshBuffers;
use super::delaunay::orient2d;
use super::error::MeshError;
use super::ring::Ring;

/// Validated rings plus their earcut triangles in counter-clockwise order.
struct Capped {
    rings: Vec<Ring>,
    points: Vec<Vec2>,
    triangles: Vec<[usize; 3]>,
}

fn cap(rings: &[Vec<Vec2>]) -> Result<Capped, MeshError> {
    let Some((outer, holes)) = rings.split_first() else {
        return Err(MeshError::EmptyPolygon);
    };
    let outer = Ring::new(outer)?;
    let outer = if outer.is_ccw() { outer } else { outer.reversed() };

    let mut normalized = vec![outer];
    for hole in holes {
        // Degenerate holes are skipped rather than failing the polygon.
        let Ok(hole) = Ring::new(hole) else {
            continue;
        };
        normalized.push(if hole.is_ccw() { hole.reversed() } else { hole });
    }

    let mut points = Vec::new();
    let mut coords = Vec::new();
    let mut hole_indices = Vec::new();
    for (i, ring) in normalized.iter().enumerate() {
        if i > 0 {
            hole_indices.push(points.len());
        }
        for p in ring.points() {
            coords.push(p.x);
            coords.push(p.y);
            points.push(*p);
        }
    }

    let flat = earcut(&coords, &hole_indices, 2).map_err(|e| MeshError::Earcut(format!("{e:?}")))?;
    let triangles = flat
        .chunks_exact(3)
        .filter_map(|t| {
            let (a, b, c) = (t[0], t[1], t[2]);
            let area = orient2d(points[a], points[b], points[c]);
            if area > 0.0 {
                Some([a, b, c])
            } else if area < 0.0 {
                Some([a, c, b])
            } else {
                None
            }
        })
        .collect();

    Ok(Capped {
        rings: normalized,
        points,
        triangles,
    })
}

/// Single-sided polygon at height `z`, facing +Z.
pub fn flat_polygon(rings: &[Vec<Vec2>], z: f64) -> Result<MeshBuffers, MeshError> {
    let capped = cap(rings)?;
    let mut out = MeshBuffers::default();
    for p in &capped.points {
        out.push_vertex(Vec3::new(p.x, p.y, z), Vec3::Z);
    }
    for t in &capped.triangles {
        out.indices.extend(t.iter().map(|&i| i as u32));
    }
    Ok(out)
}

/// Prism of height `depth` above `z = 0`: top cap, bottom cap and side walls
/// around the outer ring and every hole. Walls get their own vertices so
/// normals stay flat.
pub fn extrude_polygon(rings: &[Vec<Vec2>], depth: f64) -> Result<MeshBuffers, MeshError> {
    let capped = cap(rings)?;
    let mut out = MeshBuffers::default();

    let top: Vec<u32> = capped
        .points
        .iter()
        .map(|p| out.push_vertex(Vec3::new(p.x, p.y, depth), Vec3::Z))
        .collect();
    for t in &capped.triangles {
        out.indices.extend(t.iter().map(|&i| top[i]));
    }

    let down = Vec3::Z.neg();
    let bottom: Vec<u32> = capped
        .points
        .iter()
        .map(|p| out.push_vertex(Vec3::new(p.x, p.y, 0.0), down))
        .collect();
    for &[a, b, c] in &capped.triangles {
        out.indices.extend([bottom[a], bottom[c], bottom[b]]);
    }

    // Outer ring is CCW and holes CW, so (dy, -dx) points away from the solid.
    for ring in &capped.rings {
        let pts = ring.points();
        for (i, &a) in pts.iter().enumerate() {
            let b = pts[(i + 1) % pts.len()];
            let normal = Vec3::new(b.y - a.y, -(b.x - a.x), 0.0).normalized();
            let a0 = out.push_vertex(Vec3::new(a.x, a.y, 0.0), normal);
            let b0 = out.push_vertex(Vec3::new(b.x, b.y, 0.0), normal);
            let b1 = out.push_vertex(Vec3::new(b.x, b.y, depth), normal);
            let a1 = out.push_vertex(Vec3::new(a.x, a.y, depth), normal);
            out.indices.extend([a0, b0, b1, a0, b1, a1]);
        }
    }

    Ok(out)
}
