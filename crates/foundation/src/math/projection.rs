use super::{Vec2, Vec3};

/// Maps a 2D source coordinate into scene space.
///
/// Mesh assembly is projection-agnostic; callers pick one of the concrete
/// projections below or pass any `Fn(Vec2) -> Vec3`.
pub trait Projection {
    fn project(&self, p: Vec2) -> Vec3;
}

impl<F> Projection for F
where
    F: Fn(Vec2) -> Vec3,
{
    fn project(&self, p: Vec2) -> Vec3 {
        self(p)
    }
}

/// Longitude/latitude in degrees onto a Y-up sphere.
///
/// Longitude is negated so that east runs towards -Z: with this convention a
/// counter-clockwise ring in (lon, lat) faces away from the sphere centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphericalProjection {
    pub radius: f64,
}

impl SphericalProjection {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Projection for SphericalProjection {
    fn project(&self, p: Vec2) -> Vec3 {
        let lon = -p.x.to_radians();
        let lat = p.y.to_radians();
        Vec3::new(
            self.radius * lat.cos() * lon.cos(),
            self.radius * lat.sin(),
            self.radius * lat.cos() * lon.sin(),
        )
    }
}

/// Identity mapping onto the plane `z = const`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PlanarProjection {
    pub z: f64,
}

impl PlanarProjection {
    pub fn new(z: f64) -> Self {
        Self { z }
    }
}

impl Projection for PlanarProjection {
    fn project(&self, p: Vec2) -> Vec3 {
        Vec3::new(p.x, p.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlanarProjection, Projection, SphericalProjection};
    use crate::math::{Vec2, Vec3};

    fn assert_close(a: Vec3, b: Vec3, eps: f64) {
        let diff = (a - b).length();
        assert!(diff <= eps, "expected {a:?} ~= {b:?} (diff {diff})");
    }

    #[test]
    fn spherical_prime_meridian_equator_is_plus_x() {
        let p = SphericalProjection::new(3.0).project(Vec2::new(0.0, 0.0));
        assert_close(p, Vec3::new(3.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn spherical_east_is_minus_z_and_pole_is_up() {
        let proj = SphericalProjection::new(2.0);
        assert_close(proj.project(Vec2::new(90.0, 0.0)), Vec3::new(0.0, 0.0, -2.0), 1e-12);
        assert_close(proj.project(Vec2::new(45.0, 90.0)), Vec3::new(0.0, 2.0, 0.0), 1e-12);
    }

    #[test]
    fn spherical_points_lie_on_radius() {
        let proj = SphericalProjection::new(6.5);
        for (lon, lat) in [(12.0, 41.0), (-73.9, 40.7), (151.2, -33.8)] {
            let p = proj.project(Vec2::new(lon, lat));
            assert!((p.length() - 6.5).abs() < 1e-9);
        }
    }

    #[test]
    fn planar_keeps_xy_and_sets_z() {
        let p = PlanarProjection::new(0.25).project(Vec2::new(3.0, -1.0));
        assert_eq!(p, Vec3::new(3.0, -1.0, 0.25));
    }

    #[test]
    fn closures_are_projections() {
        let lift = |p: Vec2| Vec3::new(p.x, p.y, p.x + p.y);
        assert_eq!(lift.project(Vec2::new(1.0, 2.0)), Vec3::new(1.0, 2.0, 3.0));
    }
}
