use foundation::bounds::Aabb2;
use foundation::math::Vec2;

use super::pip;

/// Lattice spacing for interior sample points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GridStep {
    /// Absolute spacing in source units.
    Fixed(f64),
    /// Fraction of the larger side of the ring's bounding box.
    Fraction(f64),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridConfig {
    pub step: GridStep,
    /// Upper bound on lattice points per ring; the step widens to respect it.
    pub max_points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step: GridStep::Fraction(1.0 / 20.0),
            max_points: 10_000,
        }
    }
}

impl GridConfig {
    pub fn fixed(step: f64) -> Self {
        Self {
            step: GridStep::Fixed(step),
            ..Self::default()
        }
    }

    pub fn fraction(fraction: f64) -> Self {
        Self {
            step: GridStep::Fraction(fraction),
            ..Self::default()
        }
    }

    /// Spacing actually used for `bounds`, or `None` when no lattice fits.
    pub fn resolve_step(&self, bounds: &Aabb2) -> Option<f64> {
        let (w, h) = (bounds.width(), bounds.height());
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        let mut step = match self.step {
            GridStep::Fixed(s) => s,
            GridStep::Fraction(f) => f * w.max(h),
        };
        if !(step.is_finite() && step > 0.0) {
            return None;
        }
        let cap = self.max_points.max(1) as f64;
        let cells = (w / step).floor() * (h / step).floor();
        if cells > cap {
            step = (w * h / cap).sqrt();
            while (w / step).floor() * (h / step).floor() > cap {
                step *= 1.05;
            }
        }
        Some(step)
    }
}

/// Interior sample points: a lattice anchored at the bounding box minimum,
/// strictly inside the box, keeping only points inside `ring`.
pub fn generate(ring: &[Vec2], config: &GridConfig) -> Vec<Vec2> {
    let Some(bounds) = Aabb2::from_points(ring) else {
        return Vec::new();
    };
    let Some(step) = config.resolve_step(&bounds) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut iy = 1u32;
    loop {
        let y = bounds.min[1] + iy as f64 * step;
        if y >= bounds.max[1] {
            break;
        }
        let mut ix = 1u32;
        loop {
            let x = bounds.min[0] + ix as f64 * step;
            if x >= bounds.max[0] {
                break;
            }
            let p = Vec2::new(x, y);
            if pip::contains(p, ring) {
                out.push(p);
            }
            ix += 1;
        }
        iy += 1;
    }
    out
}
