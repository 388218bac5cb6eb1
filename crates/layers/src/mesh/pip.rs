use foundation::math::Vec2;

/// Even-odd point-in-polygon test. The ring is treated as closed.
///
/// Edges use a half-open rule on y, so a vertex lying exactly on the ray is
/// counted once and horizontal edges are never intersected.
pub fn contains(point: Vec2, ring: &[Vec2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::contains;
    use foundation::math::Vec2;

    fn ring(pts: &[(f64, f64)]) -> Vec<Vec2> {
        pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    #[test]
    fn unit_square() {
        let sq = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(contains(Vec2::new(0.5, 0.5), &sq));
        assert!(contains(Vec2::new(0.01, 0.99), &sq));
        assert!(!contains(Vec2::new(1.5, 0.5), &sq));
        assert!(!contains(Vec2::new(-0.1, 0.5), &sq));
        assert!(!contains(Vec2::new(0.5, 1.5), &sq));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening upwards.
        let u = ring(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        assert!(contains(Vec2::new(0.5, 2.0), &u));
        assert!(contains(Vec2::new(2.5, 2.0), &u));
        assert!(contains(Vec2::new(1.5, 0.5), &u));
        assert!(!contains(Vec2::new(1.5, 2.0), &u));
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // Diamond: the ray from (0, 0) passes exactly through vertex (2, 0).
        let diamond = ring(&[(0.0, -2.0), (2.0, 0.0), (0.0, 2.0), (-2.0, 0.0)]);
        assert!(contains(Vec2::new(0.0, 0.0), &diamond));
        assert!(!contains(Vec2::new(3.0, 0.0), &diamond));
    }

    #[test]
    fn horizontal_edges_and_closing_duplicate() {
        let closed = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        assert!(contains(Vec2::new(2.0, 1.0), &closed));
        assert!(!contains(Vec2::new(5.0, 0.0), &closed));
        assert!(!contains(Vec2::new(5.0, 2.0), &closed));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        assert!(!contains(Vec2::new(0.0, 0.0), &[]));
        assert!(!contains(
            Vec2::new(0.5, 0.0),
            &ring(&[(0.0, 0.0), (1.0, 0.0)])
        ));
    }
}
