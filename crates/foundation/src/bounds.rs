use crate::math::{Vec2, Vec3};

/// Axis-aligned bounding boxes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Aabb2::new(first.as_array(), first.as_array());
        for p in &points[1..] {
            b.min[0] = b.min[0].min(p.x);
            b.min[1] = b.min[1].min(p.y);
            b.max[0] = b.max[0].max(p.x);
            b.max[1] = b.max[1].max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Aabb3::new(first.as_array(), first.as_array());
        for p in &points[1..] {
            b.expand(*p);
        }
        Some(b)
    }

    pub fn expand(&mut self, p: Vec3) {
        let a = p.as_array();
        for i in 0..3 {
            self.min[i] = self.min[i].min(a[i]);
            self.max[i] = self.max[i].max(a[i]);
        }
    }

    pub fn union(self, other: Aabb3) -> Aabb3 {
        let mut out = self;
        out.expand(Vec3::new(other.min[0], other.min[1], other.min[2]));
        out.expand(Vec3::new(other.max[0], other.max[1], other.max[2]));
        out
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        )
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Aabb2, Aabb3};
    use crate::math::{Vec2, Vec3};

    #[test]
    fn aabb2_from_points() {
        let b = Aabb2::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b, Aabb2::new([-2.0, -1.0], [4.0, 5.0]));
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.area(), 36.0);
        assert_eq!(b.center(), Vec2::new(1.0, 2.0));
        assert!(Aabb2::from_points(&[]).is_none());
    }

    #[test]
    fn aabb3_union_center_size() {
        let a = Aabb3::from_points(&[Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)]).unwrap();
        let b = Aabb3::new([-1.0, 0.5, 0.0], [0.0, 3.0, 0.5]);
        let u = a.union(b);
        assert_eq!(u, Aabb3::new([-1.0, 0.0, 0.0], [1.0, 3.0, 1.0]));
        assert_eq!(u.center(), Vec3::new(0.0, 1.5, 0.5));
        assert_eq!(u.size(), Vec3::new(2.0, 3.0, 1.0));
    }
}
