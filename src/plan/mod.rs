pub mod baseboard;
mod cache;
pub mod event;
pub mod join;
pub mod level;
pub mod wall;

pub use baseboard::{Baseboard, BaseboardTable};
pub use event::{WallChange, WallListener, WallProperty};
pub use join::JoinSlot;
pub use level::{Level, LevelId};
pub use wall::{Wall, WallId, WallSide};

use std::collections::HashMap;
use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{PlanError, Result};
use crate::math::Point2;
use crate::operations::outline::{joined_outline, unjoined_outline, JoinedNeighbor, OutlineParams};
use crate::operations::query;
use join::{effective_join, slots_to_detach};
use wall::{check_arc_extent, check_finite, check_height, check_point, check_thickness};

/// Default wall height used when a wall has none.
const DEFAULT_WALL_HEIGHT: f64 = 250.0;

/// Central arena that owns the walls and levels of a plan.
///
/// Walls refer to their joined walls and to their level through typed IDs
/// (generational indices), so mutual joins need no shared ownership. Every
/// mutator that changes a wall outline empties the cached outlines of that
/// wall and of the two walls it is joined to, then notifies listeners.
///
/// The store is single-threaded: outlines are memoized in plain cells.
pub struct WallStore {
    walls: SlotMap<WallId, Wall>,
    levels: SlotMap<LevelId, Level>,
    baseboards: BaseboardTable,
    params: OutlineParams,
    default_wall_height: f64,
    listeners: Vec<WallListener>,
}

impl Default for WallStore {
    fn default() -> Self {
        Self::with_params(OutlineParams::default())
    }
}

impl fmt::Debug for WallStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallStore")
            .field("walls", &self.walls)
            .field("levels", &self.levels)
            .field("baseboards", &self.baseboards)
            .field("params", &self.params)
            .field("default_wall_height", &self.default_wall_height)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WallStore {
    /// Creates a new, empty store with default outline parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty store with the given outline parameters.
    #[must_use]
    pub fn with_params(params: OutlineParams) -> Self {
        Self {
            walls: SlotMap::with_key(),
            levels: SlotMap::with_key(),
            baseboards: BaseboardTable::default(),
            params,
            default_wall_height: DEFAULT_WALL_HEIGHT,
            listeners: Vec::new(),
        }
    }

    /// Sets the height assumed for walls without an explicit height.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidHeight` unless `height` is positive.
    pub fn set_default_wall_height(&mut self, height: f64) -> Result<()> {
        check_height(height)?;
        self.default_wall_height = height;
        Ok(())
    }

    #[must_use]
    pub fn default_wall_height(&self) -> f64 {
        self.default_wall_height
    }

    #[must_use]
    pub fn params(&self) -> &OutlineParams {
        &self.params
    }

    /// Registers a listener called after every wall change.
    pub fn subscribe(&mut self, listener: impl FnMut(&WallChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // --- Level operations ---

    /// Inserts a level and returns its ID.
    pub fn add_level(&mut self, level: Level) -> LevelId {
        self.levels.insert(level)
    }

    /// Returns the level data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not in the store.
    pub fn level(&self, id: LevelId) -> Result<&Level> {
        self.levels
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("level").into())
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    ///
    /// Joins and cached outlines carried by `wall` are dropped: walls enter
    /// the store detached.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall refers to a level missing from the store.
    pub fn add_wall(&mut self, wall: Wall) -> Result<WallId> {
        if let Some(level) = wall.level {
            self.level(level)?;
        }
        let mut wall = wall.detached_copy();
        for side in [WallSide::Left, WallSide::Right] {
            if let Some(b) = wall.baseboard_mut(side).take() {
                *wall.baseboard_mut(side) = Some(self.baseboards.intern((*b).clone()));
            }
        }
        Ok(self.walls.insert(wall))
    }

    /// Returns the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn wall(&self, id: WallId) -> Result<&Wall> {
        self.walls
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("wall").into())
    }

    fn wall_mut(&mut self, id: WallId) -> Result<&mut Wall> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| PlanError::EntityNotFound("wall").into())
    }

    /// Iterates over all walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter()
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Removes a wall after clearing every join that refers to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn remove_wall(&mut self, id: WallId) -> Result<Wall> {
        self.wall(id)?;
        for slot in JoinSlot::BOTH {
            self.set_joined_wall(id, slot, None)?;
        }
        let referrers: Vec<(WallId, JoinSlot)> = self
            .walls
            .iter()
            .flat_map(|(other, w)| {
                JoinSlot::BOTH
                    .into_iter()
                    .filter(move |&s| w.joined_wall(s) == Some(id))
                    .map(move |s| (other, s))
            })
            .collect();
        for (other, slot) in referrers {
            self.clear_slot(other, slot);
        }
        let wall = self
            .walls
            .remove(id)
            .ok_or(PlanError::EntityNotFound("wall"))?;
        debug!(?id, "wall removed");
        Ok(wall)
    }

    /// Copies a group of walls.
    ///
    /// Joins between walls of the group are reproduced between the copies;
    /// joins to walls outside the group are dropped. Returns the copies in
    /// the order of `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the walls is not in the store.
    pub fn duplicate_walls(&mut self, ids: &[WallId]) -> Result<Vec<WallId>> {
        for &id in ids {
            self.wall(id)?;
        }
        let mut copies: HashMap<WallId, WallId> = HashMap::with_capacity(ids.len());
        let mut order = Vec::with_capacity(ids.len());
        for &id in ids {
            let copy = match copies.get(&id) {
                Some(&copy) => copy,
                None => {
                    let detached = self.walls[id].detached_copy();
                    let copy = self.walls.insert(detached);
                    copies.insert(id, copy);
                    copy
                }
            };
            order.push(copy);
        }
        for (&original, &copy) in &copies {
            for slot in JoinSlot::BOTH {
                let joined = self.walls[original]
                    .joined_wall(slot)
                    .and_then(|j| copies.get(&j).copied());
                *self.walls[copy].joined_wall_mut(slot) = joined;
            }
        }
        Ok(order)
    }

    // --- Mutators ---

    /// Moves the start point of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or `start` is not finite.
    pub fn set_start(&mut self, id: WallId, start: Point2) -> Result<()> {
        check_point("start point", &start)?;
        self.update(id, WallProperty::Start, |w| replace(&mut w.start, start))
    }

    /// Moves the end point of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or `end` is not finite.
    pub fn set_end(&mut self, id: WallId, end: Point2) -> Result<()> {
        check_point("end point", &end)?;
        self.update(id, WallProperty::End, |w| replace(&mut w.end, end))
    }

    /// Translates both end points of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or the offset is not finite.
    pub fn move_wall(&mut self, id: WallId, dx: f64, dy: f64) -> Result<()> {
        check_finite("x offset", dx)?;
        check_finite("y offset", dy)?;
        let wall = self.wall(id)?;
        let offset = crate::math::Vector2::new(dx, dy);
        let (start, end) = (wall.start + offset, wall.end + offset);
        self.set_start(id, start)?;
        self.set_end(id, end)
    }

    /// # Errors
    ///
    /// Returns an error if the wall is missing or `thickness` is not positive.
    pub fn set_thickness(&mut self, id: WallId, thickness: f64) -> Result<()> {
        check_thickness(thickness)?;
        self.update(id, WallProperty::Thickness, |w| replace(&mut w.thickness, thickness))
    }

    /// Bends a wall into an arc, or straightens it with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing, or if the extent is not
    /// finite or spans a full turn or more.
    pub fn set_arc_extent(&mut self, id: WallId, extent: Option<f64>) -> Result<()> {
        if let Some(extent) = extent {
            check_arc_extent(extent)?;
        }
        self.update(id, WallProperty::ArcExtent, |w| replace(&mut w.arc_extent, extent))
    }

    /// # Errors
    ///
    /// Returns an error if the wall is missing or `height` is not positive.
    pub fn set_height(&mut self, id: WallId, height: Option<f64>) -> Result<()> {
        if let Some(height) = height {
            check_height(height)?;
        }
        self.update(id, WallProperty::Height, |w| replace(&mut w.height, height))
    }

    /// # Errors
    ///
    /// Returns an error if the wall is missing or `height` is not positive.
    pub fn set_height_at_end(&mut self, id: WallId, height: Option<f64>) -> Result<()> {
        if let Some(height) = height {
            check_height(height)?;
        }
        self.update(id, WallProperty::HeightAtEnd, |w| replace(&mut w.height_at_end, height))
    }

    /// # Errors
    ///
    /// Returns an error if the wall or the level is missing.
    pub fn set_level(&mut self, id: WallId, level: Option<LevelId>) -> Result<()> {
        if let Some(level) = level {
            self.level(level)?;
        }
        self.update(id, WallProperty::Level, |w| replace(&mut w.level, level))
    }

    /// Puts a baseboard on one side of a wall, or removes it with `None`.
    ///
    /// Equal baseboards are shared between walls through the store's
    /// interning table.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn set_baseboard(
        &mut self,
        id: WallId,
        side: WallSide,
        baseboard: Option<Baseboard>,
    ) -> Result<()> {
        self.wall(id)?;
        let shared = baseboard.map(|b| self.baseboards.intern(b));
        let property = match side {
            WallSide::Left => WallProperty::LeftSideBaseboard,
            WallSide::Right => WallProperty::RightSideBaseboard,
        };
        self.update(id, property, |w| {
            let slot = w.baseboard_mut(side);
            let same = match (slot.as_ref(), shared.as_ref()) {
                (Some(a), Some(b)) => a == b,
                (None, None) => true,
                _ => false,
            };
            if !same {
                *slot = shared;
            }
            !same
        })
    }

    /// Interning table of the baseboards used by the plan.
    #[must_use]
    pub fn baseboards(&self) -> &BaseboardTable {
        &self.baseboards
    }

    /// Drops interned baseboards no wall uses anymore.
    pub fn purge_baseboards(&mut self) {
        self.baseboards.purge_unused();
    }

    // --- Joins ---

    /// Joins the start of wall `id` to `wall_at_start`, or detaches it.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall is missing or the wall would join itself.
    pub fn set_wall_at_start(&mut self, id: WallId, wall_at_start: Option<WallId>) -> Result<()> {
        self.set_joined_wall(id, JoinSlot::Start, wall_at_start)
    }

    /// Joins the end of wall `id` to `wall_at_end`, or detaches it.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall is missing or the wall would join itself.
    pub fn set_wall_at_end(&mut self, id: WallId, wall_at_end: Option<WallId>) -> Result<()> {
        self.set_joined_wall(id, JoinSlot::End, wall_at_end)
    }

    /// Sets the join at `slot`, releasing the previous neighbor.
    ///
    /// When the slot held another wall, that wall's references back to `id`
    /// are cleared in a single pass, without touching `id` again.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall is missing or the wall would join itself.
    pub fn set_joined_wall(
        &mut self,
        id: WallId,
        slot: JoinSlot,
        joined: Option<WallId>,
    ) -> Result<()> {
        if let Some(joined) = joined {
            if joined == id {
                return Err(PlanError::SelfJoin.into());
            }
            self.wall(joined)?;
        }
        let old = self.wall(id)?.joined_wall(slot);
        if old == joined {
            return Ok(());
        }

        *self.wall_mut(id)?.joined_wall_mut(slot) = joined;
        self.invalidate(id);
        self.notify(id, slot_property(slot));

        if let Some(old) = old {
            for old_slot in slots_to_detach(&self.walls, id, slot, old) {
                debug!(wall = ?old, ?old_slot, from = ?id, "detaching join");
                self.clear_slot(old, old_slot);
            }
        }
        Ok(())
    }

    fn clear_slot(&mut self, id: WallId, slot: JoinSlot) {
        let Some(wall) = self.walls.get_mut(id) else {
            return;
        };
        if wall.joined_wall_mut(slot).take().is_some() {
            self.invalidate(id);
            self.notify(id, slot_property(slot));
        }
    }

    /// Resolves the join at `slot` into the neighbor and its facing end, when
    /// the join takes effect on the outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn effective_join(&self, id: WallId, slot: JoinSlot) -> Result<Option<(WallId, JoinSlot)>> {
        self.wall(id)?;
        Ok(effective_join(&self.walls, id, slot, self.params.join_tolerance))
    }

    // --- Outlines ---

    /// Returns the outline polygon of a wall.
    ///
    /// The result is memoized until the wall or one of its joined walls
    /// changes. Asking for baseboards on a wall without any returns the
    /// plain outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn outline(&self, id: WallId, include_baseboards: bool) -> Result<&[Point2]> {
        let wall = self.wall(id)?;
        let with_baseboards = include_baseboards && wall.has_baseboards();
        let points = wall
            .cache
            .cell(with_baseboards)
            .get_or_init(|| self.compute_outline(id, wall, with_baseboards));
        Ok(points.as_slice())
    }

    /// Whether the outline of a wall is currently memoized.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn is_outline_cached(&self, id: WallId, include_baseboards: bool) -> Result<bool> {
        let wall = self.wall(id)?;
        let with_baseboards = include_baseboards && wall.has_baseboards();
        Ok(wall.cache.peek(with_baseboards).is_some())
    }

    fn compute_outline(&self, id: WallId, wall: &Wall, with_baseboards: bool) -> Vec<Point2> {
        trace!(?id, with_baseboards, "computing wall outline");
        let at_start = self.joined_neighbor(id, JoinSlot::Start, with_baseboards);
        let at_end = self.joined_neighbor(id, JoinSlot::End, with_baseboards);
        joined_outline(wall, at_start, at_end, with_baseboards, &self.params)
    }

    fn joined_neighbor(
        &self,
        id: WallId,
        slot: JoinSlot,
        with_baseboards: bool,
    ) -> Option<JoinedNeighbor<'_>> {
        let (neighbor_id, facing) =
            effective_join(&self.walls, id, slot, self.params.join_tolerance)?;
        let neighbor = self.walls.get(neighbor_id)?;
        Some(JoinedNeighbor {
            outline: unjoined_outline(neighbor, with_baseboards, &self.params),
            facing,
            cached: neighbor
                .cache
                .peek(with_baseboards && neighbor.has_baseboards()),
        })
    }

    /// Empties the cached outlines of a wall and of the walls it is joined to.
    fn invalidate(&mut self, id: WallId) {
        let Some(wall) = self.walls.get_mut(id) else {
            return;
        };
        wall.cache.clear();
        let neighbors = [wall.wall_at_start, wall.wall_at_end];
        for neighbor in neighbors.into_iter().flatten() {
            if let Some(n) = self.walls.get_mut(neighbor) {
                n.cache.clear();
            }
        }
        trace!(?id, "outline caches cleared");
    }

    /// Applies `change` to a wall; when it reports a modification, clears the
    /// affected outline caches and notifies listeners.
    fn update(
        &mut self,
        id: WallId,
        property: WallProperty,
        change: impl FnOnce(&mut Wall) -> bool,
    ) -> Result<()> {
        if change(self.wall_mut(id)?) {
            if property.affects_outline() {
                self.invalidate(id);
            }
            self.notify(id, property);
        }
        Ok(())
    }

    fn notify(&mut self, wall: WallId, property: WallProperty) {
        let change = WallChange { wall, property };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    // --- Queries ---

    /// Returns whether the wall outline contains `p`, within `margin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn contains_point(
        &self,
        id: WallId,
        p: Point2,
        include_baseboards: bool,
        margin: f64,
    ) -> Result<bool> {
        let outline = self.outline(id, include_baseboards)?;
        Ok(query::contains_point(outline, &p, margin))
    }

    /// Returns whether the wall outline overlaps the rectangle spanned by two
    /// corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn intersects_rectangle(
        &self,
        id: WallId,
        corner_a: Point2,
        corner_b: Point2,
    ) -> Result<bool> {
        let outline = self.outline(id, false)?;
        Ok(query::intersects_rectangle(outline, corner_a, corner_b))
    }

    /// Returns whether `p` is within `margin` of the edge closing the wall at
    /// its start.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn contains_wall_start_at(&self, id: WallId, p: Point2, margin: f64) -> Result<bool> {
        let outline = self.outline(id, false)?;
        Ok(query::start_cap_contains(outline, &p, margin))
    }

    /// Returns whether `p` is within `margin` of the edge closing the wall at
    /// its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing.
    pub fn contains_wall_end_at(&self, id: WallId, p: Point2, margin: f64) -> Result<bool> {
        let outline = self.outline(id, false)?;
        Ok(query::end_cap_contains(outline, &p, margin))
    }

    /// Whether a wall shows on `level`.
    ///
    /// A wall shows on its own level, on a level at the same elevation with a
    /// higher elevation index, and on any higher level its top reaches.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of the levels is missing.
    #[allow(clippy::float_cmp)]
    pub fn is_at_level(&self, id: WallId, level: Option<LevelId>) -> Result<bool> {
        let wall = self.wall(id)?;
        if wall.level == level {
            return Ok(true);
        }
        let (Some(own), Some(other)) = (wall.level, level) else {
            return Ok(false);
        };
        let own = self.level(own)?;
        let other = self.level(other)?;
        let top = own.elevation + wall.max_height(self.default_wall_height);
        Ok((own.elevation == other.elevation && own.elevation_index < other.elevation_index)
            || (own.elevation < other.elevation && top > other.elevation))
    }
}

fn slot_property(slot: JoinSlot) -> WallProperty {
    match slot {
        JoinSlot::Start => WallProperty::WallAtStart,
        JoinSlot::End => WallProperty::WallAtEnd,
    }
}

/// Stores `value` in `field`, reporting whether it changed.
fn replace<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        false
    } else {
        *field = value;
        true
    }
}
