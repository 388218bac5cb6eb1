use foundation::math::Vec2;

/// Total length of the polyline through `points`.
pub fn path_length(points: &[Vec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// `resolution` points spaced evenly by arc length along the polyline.
///
/// The first and last samples are exactly the first and last waypoints. An
/// empty input yields no points; a zero-length path repeats its first point.
pub fn resample(points: &[Vec2], resolution: usize) -> Vec<Vec2> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    if resolution == 0 {
        return Vec::new();
    }
    let total = path_length(points);
    if resolution == 1 || points.len() < 2 || total <= 0.0 {
        return vec![first; resolution];
    }

    let last = points[points.len() - 1];
    let spacing = total / (resolution - 1) as f64;
    let mut out = Vec::with_capacity(resolution);
    out.push(first);

    let mut seg = 0usize;
    // Arc length at the start of `seg`.
    let mut seg_start = 0.0;
    let mut seg_len = points[0].distance(points[1]);
    for k in 1..resolution - 1 {
        let target = spacing * k as f64;
        while seg + 2 < points.len() && seg_start + seg_len < target {
            seg_start += seg_len;
            seg += 1;
            seg_len = points[seg].distance(points[seg + 1]);
        }
        let t = if seg_len > 0.0 {
            ((target - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg].lerp(points[seg + 1], t));
    }

    out.push(last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn straight_line_is_evenly_spaced() {
        let pts = resample(&[v(0.0, 0.0), v(10.0, 0.0)], 11);
        assert_eq!(pts.len(), 11);
        for (i, p) in pts.iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-12);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn corners_are_followed_by_arc_length() {
        let path = [v(0.0, 0.0), v(3.0, 0.0), v(3.0, 3.0)];
        let pts = resample(&path, 7);
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[0], v(0.0, 0.0));
        assert_eq!(pts[6], v(3.0, 3.0));
        assert!((pts[3].x - 3.0).abs() < 1e-12 && pts[3].y.abs() < 1e-12);
        for w in pts.windows(2) {
            assert!((w[0].distance(w[1]) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn duplicate_waypoints_do_not_stall() {
        let path = [v(0.0, 0.0), v(2.0, 0.0), v(2.0, 0.0), v(2.0, 2.0)];
        let pts = resample(&path, 5);
        assert_eq!(pts, vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(2.0, 1.0), v(2.0, 2.0)]);
    }

    #[test]
    fn resampling_is_deterministic() {
        let path = [v(-3.2, 1.0), v(4.7, 9.1), v(12.0, -2.5), v(20.0, 0.0)];
        assert_eq!(resample(&path, 500), resample(&path, 500));
        assert_eq!(resample(&path, 500).len(), 500);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(resample(&[], 10).is_empty());
        assert!(resample(&[v(1.0, 1.0), v(2.0, 2.0)], 0).is_empty());
        assert_eq!(resample(&[v(1.0, 1.0)], 3), vec![v(1.0, 1.0); 3]);
        assert_eq!(path_length(&[v(0.0, 0.0), v(3.0, 4.0)]), 5.0);
    }
}
