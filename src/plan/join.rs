use slotmap::SlotMap;

use super::wall::{Wall, WallId};

/// One of the two join slots of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinSlot {
    Start,
    End,
}

impl JoinSlot {
    /// Both slots, start first.
    pub const BOTH: [JoinSlot; 2] = [JoinSlot::Start, JoinSlot::End];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            JoinSlot::Start => JoinSlot::End,
            JoinSlot::End => JoinSlot::Start,
        }
    }
}

/// Resolves the join at `slot` of wall `id` into the neighbor and the
/// neighbor's end that meets it.
///
/// A join only counts when the neighbor's slot at that end points back to
/// `id` and the two end points lie within `tolerance` of each other. When
/// both neighbor ends qualify, the chain orientation wins: a start meets the
/// neighbor's end, an end meets the neighbor's start.
pub(crate) fn effective_join(
    walls: &SlotMap<WallId, Wall>,
    id: WallId,
    slot: JoinSlot,
    tolerance: f64,
) -> Option<(WallId, JoinSlot)> {
    let wall = walls.get(id)?;
    let neighbor_id = wall.joined_wall(slot)?;
    let neighbor = walls.get(neighbor_id)?;
    let joint = wall.endpoint(slot);
    let faces = |facing: JoinSlot| {
        neighbor.joined_wall(facing) == Some(id)
            && (neighbor.endpoint(facing) - joint).norm() <= tolerance
    };

    let chained = slot.opposite();
    if faces(chained) {
        Some((neighbor_id, chained))
    } else if faces(slot) {
        Some((neighbor_id, slot))
    } else {
        None
    }
}

/// Slots of `old` that must be cleared once wall `id` stops referencing it
/// from `slot`.
///
/// Every slot of `old` pointing back at `id` is returned, except when `id`
/// still holds `old` through its other slot: then only the slot facing the
/// released end is returned, so the remaining join survives.
pub(crate) fn slots_to_detach(
    walls: &SlotMap<WallId, Wall>,
    id: WallId,
    slot: JoinSlot,
    old: WallId,
) -> Vec<JoinSlot> {
    let (Some(wall), Some(old_wall)) = (walls.get(id), walls.get(old)) else {
        return Vec::new();
    };
    let back: Vec<JoinSlot> = JoinSlot::BOTH
        .into_iter()
        .filter(|&s| old_wall.joined_wall(s) == Some(id))
        .collect();
    if back.len() < 2 || wall.joined_wall(slot.opposite()) != Some(old) {
        return back;
    }

    let released = wall.endpoint(slot);
    let nearest = back
        .iter()
        .copied()
        .min_by(|&a, &b| {
            let da = (old_wall.endpoint(a) - released).norm_squared();
            let db = (old_wall.endpoint(b) - released).norm_squared();
            da.total_cmp(&db)
        })
        .unwrap_or(JoinSlot::Start);
    vec![nearest]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    const TOL: f64 = 1e-3;

    fn insert(walls: &mut SlotMap<WallId, Wall>, x0: f64, y0: f64, x1: f64, y1: f64) -> WallId {
        walls.insert(Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 10.0).unwrap())
    }

    #[test]
    fn reciprocal_coincident_join_is_effective() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 100.0, 0.0, 100.0, 100.0);
        walls[a].wall_at_end = Some(b);
        walls[b].wall_at_start = Some(a);
        assert_eq!(
            effective_join(&walls, a, JoinSlot::End, TOL),
            Some((b, JoinSlot::Start))
        );
        assert_eq!(
            effective_join(&walls, b, JoinSlot::Start, TOL),
            Some((a, JoinSlot::End))
        );
        assert_eq!(effective_join(&walls, a, JoinSlot::Start, TOL), None);
    }

    #[test]
    fn pointer_without_coincidence_is_ignored() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 150.0, 0.0, 150.0, 100.0);
        walls[a].wall_at_end = Some(b);
        walls[b].wall_at_start = Some(a);
        assert_eq!(effective_join(&walls, a, JoinSlot::End, TOL), None);
    }

    #[test]
    fn one_way_reference_is_ignored() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 100.0, 0.0, 100.0, 100.0);
        walls[a].wall_at_end = Some(b);
        assert_eq!(effective_join(&walls, a, JoinSlot::End, TOL), None);
    }

    #[test]
    fn start_to_start_join() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 0.0, 0.0, 0.0, 100.0);
        walls[a].wall_at_start = Some(b);
        walls[b].wall_at_start = Some(a);
        assert_eq!(
            effective_join(&walls, a, JoinSlot::Start, TOL),
            Some((b, JoinSlot::Start))
        );
    }

    #[test]
    fn detach_keeps_other_join_of_a_two_wall_loop() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 100.0, 0.0, 0.0, 0.0);
        walls[a].wall_at_start = Some(b);
        walls[a].wall_at_end = Some(b);
        walls[b].wall_at_start = Some(a);
        walls[b].wall_at_end = Some(a);
        // `a` releases its start; `b` ends at (0, 0) where `a` starts.
        assert_eq!(slots_to_detach(&walls, a, JoinSlot::Start, b), vec![JoinSlot::End]);

        walls[a].wall_at_end = None;
        assert_eq!(
            slots_to_detach(&walls, a, JoinSlot::Start, b),
            vec![JoinSlot::Start, JoinSlot::End]
        );
    }

    #[test]
    fn two_wall_loop_resolves_each_end() {
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 100.0, 0.0, 0.0, 0.0);
        for id in [a, b] {
            let other = if id == a { b } else { a };
            walls[id].wall_at_start = Some(other);
            walls[id].wall_at_end = Some(other);
        }
        assert_eq!(
            effective_join(&walls, a, JoinSlot::Start, TOL),
            Some((b, JoinSlot::End))
        );
        assert_eq!(
            effective_join(&walls, a, JoinSlot::End, TOL),
            Some((b, JoinSlot::Start))
        );
    }

    #[test]
    fn both_neighbor_ends_facing_prefers_chain_orientation() {
        // `b` has no length: both of its ends sit where `a` ends and `c` starts.
        let mut walls = SlotMap::with_key();
        let a = insert(&mut walls, 0.0, 0.0, 100.0, 0.0);
        let b = insert(&mut walls, 100.0, 0.0, 100.0, 0.0);
        let c = insert(&mut walls, 100.0, 0.0, 200.0, 0.0);
        walls[a].wall_at_end = Some(b);
        walls[c].wall_at_start = Some(b);
        walls[b].wall_at_start = Some(a);
        walls[b].wall_at_end = Some(a);
        assert_eq!(
            effective_join(&walls, a, JoinSlot::End, TOL),
            Some((b, JoinSlot::Start))
        );

        walls[b].wall_at_start = Some(c);
        walls[b].wall_at_end = Some(c);
        assert_eq!(
            effective_join(&walls, c, JoinSlot::Start, TOL),
            Some((b, JoinSlot::End))
        );
    }
}
