use foundation::bounds::Aabb2;
use foundation::math::Vec2;

use super::error::MeshError;

const DUPLICATE_EPS: f64 = 1e-12;

/// Validated polygon ring: implicitly closed, no consecutive duplicates,
/// at least three points and a non-zero area.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Vec2>,
    bounds: Aabb2,
    signed_area: f64,
}

impl Ring {
    pub fn new(points: &[Vec2]) -> Result<Self, MeshError> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(MeshError::NonFiniteCoordinate { index });
        }

        let mut cleaned: Vec<Vec2> = Vec::with_capacity(points.len());
        for &p in points {
            if cleaned.last().is_some_and(|&last| same_point(last, p)) {
                continue;
            }
            cleaned.push(p);
        }
        while cleaned.len() >= 2 && same_point(cleaned[0], cleaned[cleaned.len() - 1]) {
            cleaned.pop();
        }
        if cleaned.len() < 3 {
            return Err(MeshError::TooFewPoints { got: cleaned.len() });
        }

        let Some(bounds) = Aabb2::from_points(&cleaned) else {
            return Err(MeshError::TooFewPoints { got: 0 });
        };
        let signed_area = signed_area(&cleaned);
        let scale = bounds.width().max(bounds.height());
        if signed_area.abs() <= 1e-12 * scale * scale {
            return Err(MeshError::ZeroArea);
        }

        Ok(Self {
            points: cleaned,
            bounds,
            signed_area,
        })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    /// Positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area > 0.0
    }

    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            bounds: self.bounds,
            signed_area: -self.signed_area,
        }
    }
}

/// Shoelace area, positive when counter-clockwise.
pub fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        acc += points[i].perp_dot(points[(i + 1) % n]);
    }
    acc * 0.5
}

fn same_point(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() <= DUPLICATE_EPS && (a.y - b.y).abs() <= DUPLICATE_EPS
}

#[cfg(test)]
mod tests {
    use super::{Ring, signed_area};
    use crate::mesh::error::MeshError;
    use foundation::math::Vec2;

    fn pts(p: &[(f64, f64)]) -> Vec<Vec2> {
        p.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    #[test]
    fn strips_closing_and_consecutive_duplicates() {
        let ring = Ring::new(&pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]))
        .unwrap();
        assert_eq!(ring.points().len(), 4);
        assert_eq!(ring.signed_area(), 1.0);
        assert!(ring.is_ccw());
        assert!(!ring.reversed().is_ccw());
    }

    #[test]
    fn rejects_too_few_points() {
        let err = Ring::new(&pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).unwrap_err();
        assert_eq!(err, MeshError::TooFewPoints { got: 2 });
        assert_eq!(
            Ring::new(&[]).unwrap_err(),
            MeshError::TooFewPoints { got: 0 }
        );
    }

    #[test]
    fn rejects_zero_area() {
        let err = Ring::new(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap_err();
        assert_eq!(err, MeshError::ZeroArea);
    }

    #[test]
    fn rejects_non_finite() {
        let err = Ring::new(&pts(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, 0.0)])).unwrap_err();
        assert_eq!(err, MeshError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn clockwise_area_is_negative() {
        let cw = pts(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        assert_eq!(signed_area(&cw), -4.0);
    }
}
