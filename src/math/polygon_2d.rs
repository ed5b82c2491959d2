use super::intersect_2d::segment_intersects_rect;
use super::{Point2, Rect2};

/// Returns whether `p` lies inside the closed polygon using the non-zero
/// winding rule.
#[must_use]
pub fn polygon_contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut winding = 0_i32;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Returns whether the closed polygon and `rect` overlap.
#[must_use]
pub fn polygon_intersects_rect(points: &[Point2], rect: &Rect2) -> bool {
    if points.iter().any(|p| rect.contains(p)) {
        return true;
    }
    if rect
        .corners()
        .iter()
        .any(|c| polygon_contains_point(points, c))
    {
        return true;
    }
    let n = points.len();
    (0..n).any(|i| segment_intersects_rect(&points[i], &points[(i + 1) % n], rect))
}
