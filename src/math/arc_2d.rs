//! Circular-arc helpers for round walls.
//!
//! Arcs are described by their chord endpoints and a signed extent in
//! radians. Angles are measured on screen: `θ = 0` points toward +x and
//! `θ = π/2` points toward −y, so a point at angle `θ` on a circle of radius
//! `r` is `(cx + r·cos θ, cy − r·sin θ)`. Walking from the start point to the
//! end point of an arc of extent `e` decreases this angle by `e`, which keeps
//! the circle center on the right-hand side when `e > 0`.
use super::{Point2, Vector2, TOLERANCE};

/// Returns the center of the circle supporting the arc from `start` to `end`
/// with the given signed `extent`.
///
/// Returns the chord midpoint for a zero-length chord.
#[must_use]
pub fn arc_circle_center(start: &Point2, end: &Point2, extent: f64) -> Point2 {
    let chord = end - start;
    let chord_len = chord.norm();
    let middle = nalgebra::center(start, end);
    if chord_len < TOLERANCE {
        return middle;
    }
    // Right-hand normal of the chord in screen orientation.
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center_distance = chord_len / 2.0 / (extent / 2.0).tan();
    middle + normal * center_distance
}

/// Returns the screen angle of `point` seen from `center`.
#[must_use]
pub fn screen_angle(center: &Point2, point: &Point2) -> f64 {
    (center.y - point.y).atan2(point.x - center.x)
}

/// Evaluates the point at screen angle `angle` on a circle.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}

/// Length of an arc of the given radius and signed extent.
#[must_use]
pub fn arc_length(radius: f64, extent: f64) -> f64 {
    radius * extent.abs()
}
