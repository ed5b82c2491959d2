use super::{Point2, Rect2, TOLERANCE};

/// Slope thresholds used when snapping a corner to the intersection of two
/// boundary lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeTolerance {
    /// Slopes steeper than this (in absolute value) are treated as vertical.
    pub vertical_limit: f64,
    /// Absolute slope difference under which lines are considered parallel.
    pub parallel_difference: f64,
    /// Same-sign slope ratio under which lines are considered parallel.
    pub parallel_ratio: f64,
}

impl Default for SlopeTolerance {
    fn default() -> Self {
        Self {
            vertical_limit: 4000.0,
            parallel_difference: 1e-5,
            parallel_ratio: 1.004,
        }
    }
}

/// Moves `p1` to the intersection of the line through `p1, p2` with the line
/// through `p3, p4`.
///
/// Lines are handled in slope-intercept form. A line steeper than
/// `tolerance.vertical_limit` is treated as vertical and the intersection is
/// read off the other line's equation. Nearly parallel lines leave `p1` where
/// it is, as does any intersection at `limit` or more from `p1`.
#[must_use]
#[allow(clippy::float_cmp, clippy::similar_names)]
pub fn snap_corner(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    p4: &Point2,
    limit: f64,
    tolerance: &SlopeTolerance,
) -> Point2 {
    let alpha1 = (p2.y - p1.y) / (p2.x - p1.x);
    let alpha2 = (p4.y - p3.y) / (p4.x - p3.x);
    // Identical slopes never intersect, and both-infinite slopes land here too.
    if alpha1 == alpha2 {
        return *p1;
    }

    let (mut x, mut y) = (p1.x, p1.y);
    if alpha1.abs() > tolerance.vertical_limit {
        if alpha2.abs() < tolerance.vertical_limit {
            let beta2 = p4.y - alpha2 * p4.x;
            x = p1.x;
            y = alpha2 * x + beta2;
        }
    } else if alpha2.abs() > tolerance.vertical_limit {
        let beta1 = p2.y - alpha1 * p2.x;
        x = p3.x;
        y = alpha1 * x + beta1;
    } else {
        let same_sign = slope_sign(alpha1) == slope_sign(alpha2);
        let ratio = if alpha1.abs() > alpha2.abs() {
            alpha1 / alpha2
        } else {
            alpha2 / alpha1
        };
        if (alpha1 - alpha2).abs() > tolerance.parallel_difference
            && (!same_sign || ratio > tolerance.parallel_ratio)
        {
            let beta1 = p2.y - alpha1 * p2.x;
            let beta2 = p4.y - alpha2 * p4.x;
            x = (beta2 - beta1) / (alpha1 - alpha2);
            y = alpha1 * x + beta1;
        }
    }

    if (x - p1.x).powi(2) + (y - p1.y).powi(2) < limit * limit {
        Point2::new(x, y)
    } else {
        *p1
    }
}

/// Three-way sign where zero is its own class.
fn slope_sign(alpha: f64) -> i8 {
    if alpha > 0.0 {
        1
    } else if alpha < 0.0 {
        -1
    } else {
        0
    }
}

/// Returns whether the segment from `a` to `b` touches `rect`.
///
/// Liang-Barsky clipping of the segment parameter range against the four
/// rectangle slabs.
#[must_use]
pub fn segment_intersects_rect(a: &Point2, b: &Point2, rect: &Rect2) -> bool {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let slabs = [
        (-d.x, a.x - rect.min.x),
        (d.x, rect.max.x - a.x),
        (-d.y, a.y - rect.min.y),
        (d.y, rect.max.y - a.y),
    ];
    for (p, q) in slabs {
        if p.abs() < TOLERANCE {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(
        p1: (f64, f64),
        p2: (f64, f64),
        p3: (f64, f64),
        p4: (f64, f64),
        limit: f64,
    ) -> Point2 {
        snap_corner(
            &Point2::new(p1.0, p1.1),
            &Point2::new(p2.0, p2.1),
            &Point2::new(p3.0, p3.1),
            &Point2::new(p4.0, p4.1),
            limit,
            &SlopeTolerance::default(),
        )
    }

    #[test]
    fn snap_to_vertical_line() {
        let p = snap((100.0, -5.0), (0.0, -5.0), (105.0, 0.0), (105.0, 100.0), 20.0);
        assert_eq!(p, Point2::new(105.0, -5.0));
    }

    #[test]
    fn snap_from_vertical_line() {
        let p = snap((105.0, 0.0), (105.0, 100.0), (100.0, -5.0), (0.0, -5.0), 20.0);
        assert_eq!(p, Point2::new(105.0, -5.0));
    }

    #[test]
    fn snap_two_oblique_lines() {
        // y = x and y = -x + 10 meet at (5, 5).
        let p = snap((4.0, 4.0), (0.0, 0.0), (6.0, 4.0), (10.0, 0.0), 20.0);
        assert!((p.x - 5.0).abs() < TOLERANCE, "x={}", p.x);
        assert!((p.y - 5.0).abs() < TOLERANCE, "y={}", p.y);
    }

    #[test]
    fn identical_slopes_keep_point() {
        let p = snap((100.0, -5.0), (0.0, -5.0), (100.0, -5.0), (200.0, -5.0), 20.0);
        assert_eq!(p, Point2::new(100.0, -5.0));
    }

    #[test]
    fn two_vertical_lines_keep_point() {
        let p = snap((0.0, 0.0), (0.0, 10.0), (1.0, 0.0), (1.0, -10.0), 20.0);
        assert_eq!(p, Point2::new(0.0, 0.0));
    }

    #[test]
    fn nearly_parallel_same_sign_keeps_point() {
        // Slopes 1.0 and 1.002: ratio under 1.004.
        let p = snap((10.0, 10.0), (0.0, 0.0), (10.0, 11.0), (20.0, 21.02), 20.0);
        assert_eq!(p, Point2::new(10.0, 10.0));
    }

    #[test]
    fn far_intersection_is_discarded() {
        // Lines meet at (5, 5), farther than the limit from (4, 4).
        let p = snap((4.0, 4.0), (0.0, 0.0), (6.0, 4.0), (10.0, 0.0), 1.0);
        assert_eq!(p, Point2::new(4.0, 4.0));
    }

    #[test]
    fn segment_rect_clipping() {
        let rect = Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let touches = |a: (f64, f64), b: (f64, f64)| {
            segment_intersects_rect(&Point2::new(a.0, a.1), &Point2::new(b.0, b.1), &rect)
        };
        // Crosses the rectangle.
        assert!(touches((-1.0, 1.0), (3.0, 1.0)));
        // Ends inside.
        assert!(touches((1.0, 1.0), (5.0, 5.0)));
        // Passes beside.
        assert!(!touches((-1.0, 3.0), (3.0, 3.0)));
        // Diagonal missing the corner.
        assert!(!touches((2.5, 0.0), (4.0, 1.5)));
    }
}
