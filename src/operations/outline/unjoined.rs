use crate::math::arc_2d::{arc_circle_center, arc_length, arc_point_at, screen_angle};
use crate::math::{Point2, Vector2};
use crate::plan::{Wall, WallSide};

use super::{ArcStepPolicy, OutlineParams};

/// Builds the outline of `wall` as if it had no joined walls.
///
/// Straight walls give exactly four points. Round walls give one left and one
/// right point per angular step, with the step size scaled by the square root
/// of the exterior arc length so the chord error stays about the same for
/// every radius, up to `params.max_arc_steps` steps. Baseboard thicknesses
/// widen their side when `include_baseboards` is set.
#[must_use]
pub fn unjoined_outline(
    wall: &Wall,
    include_baseboards: bool,
    params: &OutlineParams,
) -> Vec<Point2> {
    let (left_extra, right_extra) = if include_baseboards {
        (
            wall.baseboard_thickness(WallSide::Left),
            wall.baseboard_thickness(WallSide::Right),
        )
    } else {
        (0.0, 0.0)
    };

    match wall.round_extent(params.min_arc_chord_sq) {
        Some(extent) => round_outline(wall, extent, left_extra, right_extra, params),
        None => straight_outline(wall, left_extra, right_extra),
    }
}

fn straight_outline(wall: &Wall, left_extra: f64, right_extra: f64) -> Vec<Point2> {
    let (start, end) = (wall.start(), wall.end());
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let (sin, cos) = angle.sin_cos();
    let half = wall.thickness() / 2.0;
    let side = Vector2::new(sin, -cos);
    let left = side * (half + left_extra);
    let right = side * (half + right_extra);
    vec![start + left, end + left, end - right, start - right]
}

fn round_outline(
    wall: &Wall,
    extent: f64,
    left_extra: f64,
    right_extra: f64,
    params: &OutlineParams,
) -> Vec<Point2> {
    let (start, end) = (wall.start(), wall.end());
    let center = arc_circle_center(&start, &end, extent);
    let radius = (start - center).norm();
    let start_angle = screen_angle(&center, &start);
    let half = wall.thickness() / 2.0;

    let exterior_radius = radius + half;
    let interior_radius = (radius - half).max(0.0);
    let steps = arc_length(exterior_radius, extent)
        .sqrt()
        .min(f64::from(params.max_arc_steps.max(1)));
    let angle_delta = extent / steps;

    // The circle center lies right of the wall for positive extents.
    let (left_radius, right_radius) = if extent > 0.0 {
        (exterior_radius + left_extra, (interior_radius - right_extra).max(0.0))
    } else {
        ((interior_radius - left_extra).max(0.0), exterior_radius + right_extra)
    };

    let offsets = match params.arc_step_policy {
        ArcStepPolicy::Symmetric => symmetric_offsets(extent, angle_delta),
        ArcStepPolicy::Asymmetric => asymmetric_offsets(extent, angle_delta),
    };

    let mut points = Vec::with_capacity(offsets.len() * 2);
    let mut right_side = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let angle = start_angle - offset;
        points.push(arc_point_at(&center, left_radius, angle));
        right_side.push(arc_point_at(&center, right_radius, angle));
    }
    points.extend(right_side.into_iter().rev());
    points
}

/// Angular offsets from the start, in equal steps landing exactly on `extent`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn symmetric_offsets(extent: f64, angle_delta: f64) -> Vec<f64> {
    let mut count = (extent / angle_delta) as usize;
    if (extent - count as f64 * angle_delta).abs() > 1e-6 {
        count += 1;
    }
    let count = count.max(1);
    let step = extent / count as f64;
    (0..=count)
        .map(|i| if i == count { extent } else { i as f64 * step })
        .collect()
}

/// Angular offsets from the start in steps of `angle_delta`, closed by a
/// final offset at `extent`, so the last step may be shorter. A step landing
/// on `extent` is not repeated.
fn asymmetric_offsets(extent: f64, angle_delta: f64) -> Vec<f64> {
    let steps = extent / angle_delta;
    let mut offsets: Vec<f64> = (0_u32..)
        .map(f64::from)
        .take_while(|&i| i < steps && (extent - i * angle_delta).abs() > 1e-6)
        .map(|i| i * angle_delta)
        .collect();
    offsets.push(extent);
    offsets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::Baseboard;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};
    use std::rc::Rc;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64, thickness: f64) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), thickness).unwrap()
    }

    fn assert_point(p: &Point2, x: f64, y: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }

    #[test]
    fn horizontal_rectangle() {
        let w = wall(0.0, 0.0, 100.0, 0.0, 10.0);
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        assert_eq!(pts.len(), 4);
        assert_point(&pts[0], 0.0, -5.0);
        assert_point(&pts[1], 100.0, -5.0);
        assert_point(&pts[2], 100.0, 5.0);
        assert_point(&pts[3], 0.0, 5.0);
    }

    #[test]
    fn vertical_rectangle() {
        let w = wall(100.0, 0.0, 100.0, 100.0, 10.0);
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        assert_point(&pts[0], 105.0, 0.0);
        assert_point(&pts[1], 105.0, 100.0);
        assert_point(&pts[2], 95.0, 100.0);
        assert_point(&pts[3], 95.0, 0.0);
    }

    #[test]
    fn diagonal_rectangle_keeps_thickness() {
        let w = wall(0.0, 0.0, 50.0, 50.0, 10.0);
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        let h = 5.0 / SQRT_2;
        assert_point(&pts[0], h, -h);
        assert_point(&pts[1], 50.0 + h, 50.0 - h);
        assert_point(&pts[2], 50.0 - h, 50.0 + h);
        assert_point(&pts[3], -h, h);
        assert_relative_eq!((pts[0] - pts[3]).norm(), 10.0, epsilon = 1e-9);
        assert_relative_eq!((pts[1] - pts[2]).norm(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_wall_stays_straight() {
        let w = wall(10.0, 10.0, 10.0, 10.0, 4.0).with_arc_extent(FRAC_PI_2).unwrap();
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        assert_eq!(pts.len(), 4);
        assert_point(&pts[0], 10.0, 8.0);
        assert_point(&pts[2], 10.0, 12.0);
    }

    #[test]
    fn baseboards_widen_their_side_only() {
        let mut w = wall(0.0, 0.0, 100.0, 0.0, 10.0);
        w.left_baseboard = Some(Rc::new(Baseboard::new(1.0, 10.0).unwrap()));
        let params = OutlineParams::default();
        let pts = unjoined_outline(&w, true, &params);
        assert_point(&pts[0], 0.0, -6.0);
        assert_point(&pts[2], 100.0, 5.0);
        let plain = unjoined_outline(&w, false, &params);
        assert_point(&plain[0], 0.0, -5.0);
    }

    #[test]
    fn quarter_arc_ends_and_radii() {
        // Radius 100 arc bending left of the chord, center right of it.
        let r = 100.0;
        let w = wall(0.0, 0.0, r * SQRT_2, 0.0, 10.0).with_arc_extent(FRAC_PI_2).unwrap();
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        assert_eq!(pts.len() % 2, 0);
        let n = pts.len();
        let center = w.arc_circle_center().unwrap();
        assert!(center.y > 0.0);
        for p in &pts[..n / 2] {
            assert_relative_eq!((p - center).norm(), r + 5.0, epsilon = 1e-9);
        }
        for p in &pts[n / 2..] {
            assert_relative_eq!((p - center).norm(), r - 5.0, epsilon = 1e-9);
        }
        // First and last points bracket the start, middle points the end.
        let start_mid = nalgebra::center(&pts[0], &pts[n - 1]);
        assert_point(&start_mid, 0.0, 0.0);
        let end_mid = nalgebra::center(&pts[n / 2 - 1], &pts[n / 2]);
        assert_point(&end_mid, r * SQRT_2, 0.0);
    }

    #[test]
    fn negative_extent_swaps_exterior_side() {
        let w = wall(0.0, 0.0, 100.0 * SQRT_2, 0.0, 10.0).with_arc_extent(-FRAC_PI_2).unwrap();
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        let center = w.arc_circle_center().unwrap();
        assert!(center.y < 0.0);
        assert_relative_eq!((pts[0] - center).norm(), 95.0, epsilon = 1e-9);
        assert_relative_eq!((pts[pts.len() - 1] - center).norm(), 105.0, epsilon = 1e-9);
    }

    #[test]
    fn interior_radius_never_negative() {
        // Radius 2 arc with thickness 10: interior collapses onto the center.
        let w = wall(0.0, 0.0, 4.0, 0.0, 10.0).with_arc_extent(PI).unwrap();
        let pts = unjoined_outline(&w, false, &OutlineParams::default());
        let center = w.arc_circle_center().unwrap();
        let n = pts.len();
        for p in &pts[n / 2..] {
            assert!((p - center).norm() < 1e-9);
        }
    }

    #[test]
    fn symmetric_steps_are_equal() {
        let offsets = symmetric_offsets(FRAC_PI_2, FRAC_PI_2 / 12.84);
        assert_eq!(offsets.len(), 14);
        let step = offsets[1] - offsets[0];
        for pair in offsets.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], step, epsilon = 1e-12);
        }
        assert!((offsets[13] - FRAC_PI_2).abs() < f64::EPSILON);
    }

    #[test]
    fn tiny_arc_gets_one_step() {
        assert_eq!(symmetric_offsets(0.5, 2.0), vec![0.0, 0.5]);
    }

    #[test]
    fn asymmetric_steps_end_short() {
        let delta = FRAC_PI_4 / 2.5;
        let offsets = asymmetric_offsets(FRAC_PI_4, delta);
        assert_eq!(offsets.len(), 4);
        assert_relative_eq!(offsets[1], delta, epsilon = 1e-12);
        assert_relative_eq!(offsets[2], 2.0 * delta, epsilon = 1e-12);
        assert!((offsets[3] - FRAC_PI_4).abs() < f64::EPSILON);
    }

    #[test]
    fn asymmetric_keeps_short_last_step() {
        // 3.05 steps: the final step is a twentieth of the others.
        let delta = 1.0 / 3.05;
        let offsets = asymmetric_offsets(1.0, delta);
        assert_eq!(offsets.len(), 5);
        assert_relative_eq!(offsets[3], 3.0 * delta, epsilon = 1e-12);
        assert!((offsets[4] - 1.0).abs() < f64::EPSILON);
        // Negative extents step the same way.
        assert_eq!(asymmetric_offsets(-1.0, -delta).len(), 5);
    }

    #[test]
    fn asymmetric_does_not_repeat_the_end() {
        assert_eq!(asymmetric_offsets(1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn near_full_turn_step_count_is_bounded() {
        // A chord of 100 under an extent just short of a full turn sits on a
        // circle of radius around 1e10.
        let w = wall(0.0, 0.0, 100.0, 0.0, 10.0)
            .with_arc_extent(2.0 * PI - 1e-8)
            .unwrap();
        let params = OutlineParams::default();
        let cap = usize::try_from(params.max_arc_steps).unwrap();
        let pts = unjoined_outline(&w, false, &params);
        assert_eq!(pts.len(), 2 * (cap + 1));

        let asymmetric = OutlineParams {
            arc_step_policy: ArcStepPolicy::Asymmetric,
            ..params
        };
        let pts = unjoined_outline(&w, false, &asymmetric);
        assert!(pts.len() <= 2 * (cap + 2));
    }

    #[test]
    fn asymmetric_policy_outline() {
        let params = OutlineParams {
            arc_step_policy: ArcStepPolicy::Asymmetric,
            ..OutlineParams::default()
        };
        let w = wall(0.0, 0.0, 100.0 * SQRT_2, 0.0, 10.0).with_arc_extent(FRAC_PI_2).unwrap();
        let pts = unjoined_outline(&w, false, &params);
        let n = pts.len();
        assert_eq!(n % 2, 0);
        let end_mid = nalgebra::center(&pts[n / 2 - 1], &pts[n / 2]);
        assert_point(&end_mid, 100.0 * SQRT_2, 0.0);
    }
}
