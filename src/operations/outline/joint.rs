use crate::math::intersect_2d::snap_corner;
use crate::math::Point2;
use crate::plan::{JoinSlot, Wall};

use super::{unjoined_outline, OutlineParams};

/// What the outline builder needs to know about a wall joined at one end.
#[derive(Debug, Clone)]
pub struct JoinedNeighbor<'a> {
    /// Unjoined outline of the neighbor.
    pub outline: Vec<Point2>,
    /// End of the neighbor that meets the wall being built.
    pub facing: JoinSlot,
    /// Outline the neighbor currently has cached, if any.
    pub cached: Option<&'a [Point2]>,
}

/// Indices of the corner points at one end of an outline, each paired with
/// the adjacent point along the same side.
#[derive(Debug, Clone, Copy)]
struct CornerEdges {
    left: (usize, usize),
    right: (usize, usize),
}

impl CornerEdges {
    fn at(len: usize, slot: JoinSlot) -> Self {
        let half = len / 2;
        match slot {
            JoinSlot::Start => Self {
                left: (0, 1),
                right: (len - 1, len - 2),
            },
            JoinSlot::End => Self {
                left: (half - 1, half - 2),
                right: (half, half + 1),
            },
        }
    }
}

/// Builds the outline of `wall`, snapping its corners onto the boundaries of
/// the walls joined at its start and end.
///
/// Each side is snapped independently: a start joined to a neighbor's end
/// pairs left with left and right with right, while a start joined to a
/// neighbor's start (or an end to an end) pairs left with right. A snapped
/// corner within `weld_epsilon` of the neighbor's cached corner takes the
/// cached coordinates so both outlines share bit-identical vertices.
#[must_use]
pub fn joined_outline(
    wall: &Wall,
    at_start: Option<JoinedNeighbor<'_>>,
    at_end: Option<JoinedNeighbor<'_>>,
    include_baseboards: bool,
    params: &OutlineParams,
) -> Vec<Point2> {
    let mut points = unjoined_outline(wall, include_baseboards, params);
    let limit = params.corner_limit_factor * wall.thickness();

    for (slot, neighbor) in [(JoinSlot::Start, at_start), (JoinSlot::End, at_end)] {
        let Some(neighbor) = neighbor else {
            continue;
        };
        if points.len() < 4 || neighbor.outline.len() < 4 {
            continue;
        }
        let own = CornerEdges::at(points.len(), slot);
        let theirs = CornerEdges::at(neighbor.outline.len(), neighbor.facing);
        let pairs = if slot == neighbor.facing {
            [(own.left, theirs.right), (own.right, theirs.left)]
        } else {
            [(own.left, theirs.left), (own.right, theirs.right)]
        };

        for ((corner, inner), (their_corner, their_inner)) in pairs {
            let snapped = snap_corner(
                &points[corner],
                &points[inner],
                &neighbor.outline[their_corner],
                &neighbor.outline[their_inner],
                limit,
                &params.slope,
            );
            let cached = neighbor.cached.and_then(|c| c.get(their_corner));
            points[corner] = weld(snapped, cached, params.weld_epsilon);
        }
    }

    points
}

fn weld(point: Point2, cached: Option<&Point2>, epsilon: f64) -> Point2 {
    match cached {
        Some(c) if (point.x - c.x).abs() < epsilon && (point.y - c.y).abs() < epsilon => *c,
        _ => point,
    }
}
