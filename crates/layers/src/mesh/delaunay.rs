//! Incremental Bowyer–Watson Delaunay triangulation over `f64` points.
//!
//! Output triangles index into the input slice and are counter-clockwise.
//! Points coinciding with an already inserted point are skipped and stay
//! unreferenced. Fewer than three usable points, or an all-collinear input,
//! produce no triangles.

use foundation::bounds::Aabb2;
use foundation::math::Vec2;

/// Super-triangle size relative to the input extent.
const SUPER_SCALE: f64 = 100.0;
/// Cavity repair passes per insertion before the point is given up on.
const MAX_REPAIRS: usize = 64;

#[derive(Debug, Copy, Clone)]
struct Tri {
    v: [usize; 3],
}

impl Tri {
    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges().contains(&(a, b))
    }
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
pub fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Positive when `p` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `abc`.
pub fn in_circle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> f64 {
    let (adx, ady) = (a.x - p.x, a.y - p.y);
    let (bdx, bdy) = (b.x - p.x, b.y - p.y);
    let (cdx, cdy) = (c.x - p.x, c.y - p.y);
    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;
    ad * (bdx * cdy - cdx * bdy) + bd * (cdx * ady - adx * cdy) + cd * (adx * bdy - bdx * ady)
}

pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let Some(bounds) = Aabb2::from_points(points) else {
        return Vec::new();
    };
    let size = bounds.width().max(bounds.height());
    if !(size.is_finite() && size > 0.0) {
        return Vec::new();
    }

    let mid = bounds.center();
    let d = size * SUPER_SCALE;
    let mut pts: Vec<Vec2> = points.to_vec();
    pts.push(Vec2::new(mid.x - d, mid.y - d));
    pts.push(Vec2::new(mid.x + d, mid.y - d));
    pts.push(Vec2::new(mid.x, mid.y + d));

    let mut tris = vec![Tri { v: [n, n + 1, n + 2] }];
    let dup_eps = size * 1e-12;

    for i in 0..n {
        let p = pts[i];
        if !(p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        let Some(start) = tris.iter().position(|t| encloses(&pts, t, p)) else {
            continue;
        };
        if tris[start]
            .v
            .iter()
            .any(|&v| (pts[v].x - p.x).abs() <= dup_eps && (pts[v].y - p.y).abs() <= dup_eps)
        {
            continue;
        }

        let Some(cavity) = carve_cavity(&pts, &tris, start, p) else {
            continue;
        };

        let mut boundary = Vec::new();
        for &ti in &cavity {
            for (a, b) in tris[ti].edges() {
                let shared = cavity
                    .iter()
                    .any(|&other| other != ti && tris[other].has_edge(b, a));
                if !shared {
                    boundary.push((a, b));
                }
            }
        }

        let mut doomed = cavity;
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        for ti in doomed {
            tris.swap_remove(ti);
        }
        for (a, b) in boundary {
            tris.push(Tri { v: [a, b, i] });
        }
    }

    tris.into_iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .filter(|t| orient2d(pts[t.v[0]], pts[t.v[1]], pts[t.v[2]]) > 0.0)
        .map(|t| t.v)
        .collect()
}

/// `p` inside or on the boundary of `t`.
fn encloses(pts: &[Vec2], t: &Tri, p: Vec2) -> bool {
    t.edges()
        .iter()
        .all(|&(a, b)| orient2d(pts[a], pts[b], p) >= 0.0)
}

fn neighbour(tris: &[Tri], ti: usize, a: usize, b: usize) -> Option<usize> {
    tris.iter()
        .enumerate()
        .find(|(j, t)| *j != ti && t.has_edge(b, a))
        .map(|(j, _)| j)
}

/// Triangles to replace when inserting `p`: the edge-connected set of
/// triangles whose circumcircle contains `p`, grown from the triangle that
/// encloses it, then trimmed until every boundary edge sees `p` on its left.
fn carve_cavity(pts: &[Vec2], tris: &[Tri], start: usize, p: Vec2) -> Option<Vec<usize>> {
    let mut cavity = vec![start];
    let mut forced = vec![start];
    let mut queue = vec![start];
    while let Some(ti) = queue.pop() {
        for (a, b) in tris[ti].edges() {
            let Some(nj) = neighbour(tris, ti, a, b) else {
                continue;
            };
            if cavity.contains(&nj) {
                continue;
            }
            let t = tris[nj];
            if in_circle(pts[t.v[0]], pts[t.v[1]], pts[t.v[2]], p) > 0.0 {
                cavity.push(nj);
                queue.push(nj);
            }
        }
    }

    for _ in 0..MAX_REPAIRS {
        let mut offending = None;
        'scan: for &ti in &cavity {
            for (a, b) in tris[ti].edges() {
                let shared = cavity
                    .iter()
                    .any(|&other| other != ti && tris[other].has_edge(b, a));
                if !shared && orient2d(pts[a], pts[b], p) <= 0.0 {
                    offending = Some((ti, a, b));
                    break 'scan;
                }
            }
        }
        let Some((ti, a, b)) = offending else {
            return Some(cavity);
        };
        if forced.contains(&ti) {
            // `p` sits on this edge: the triangle across it must go too.
            let nj = neighbour(tris, ti, a, b)?;
            if cavity.contains(&nj) {
                return None;
            }
            cavity.push(nj);
            forced.push(nj);
        } else {
            cavity.retain(|&t| t != ti);
        }
    }
    None
}
