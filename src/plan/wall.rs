use std::f64::consts::TAU;
use std::rc::Rc;

use super::baseboard::Baseboard;
use super::cache::OutlineCache;
use super::join::JoinSlot;
use super::level::LevelId;
use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_circle_center, arc_length};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the wall store.
    pub struct WallId;
}

/// Side of a wall, relative to its start-to-end direction on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Left,
    Right,
}

/// One straight or round wall segment.
///
/// Walls are created detached and handed to a [`WallStore`](super::WallStore),
/// which owns joins, baseboard sharing and the outline cache from then on.
#[derive(Debug, Clone)]
pub struct Wall {
    pub(crate) start: Point2,
    pub(crate) end: Point2,
    pub(crate) arc_extent: Option<f64>,
    pub(crate) thickness: f64,
    pub(crate) height: Option<f64>,
    pub(crate) height_at_end: Option<f64>,
    pub(crate) level: Option<LevelId>,
    pub(crate) wall_at_start: Option<WallId>,
    pub(crate) wall_at_end: Option<WallId>,
    pub(crate) left_baseboard: Option<Rc<Baseboard>>,
    pub(crate) right_baseboard: Option<Rc<Baseboard>>,
    pub(crate) cache: OutlineCache,
}

impl Wall {
    /// Creates a straight wall between two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates and
    /// `GeometryError::InvalidThickness` unless `thickness` is positive.
    pub fn new(start: Point2, end: Point2, thickness: f64) -> Result<Self> {
        check_point("start point", &start)?;
        check_point("end point", &end)?;
        check_thickness(thickness)?;
        Ok(Self {
            start,
            end,
            arc_extent: None,
            thickness,
            height: None,
            height_at_end: None,
            level: None,
            wall_at_start: None,
            wall_at_end: None,
            left_baseboard: None,
            right_baseboard: None,
            cache: OutlineCache::default(),
        })
    }

    /// Returns a copy bent into an arc of the given signed extent in radians.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if `extent` is NaN or infinite and
    /// `GeometryError::InvalidArcExtent` if it spans a full turn or more.
    pub fn with_arc_extent(mut self, extent: f64) -> Result<Self> {
        check_arc_extent(extent)?;
        self.arc_extent = Some(extent);
        Ok(self)
    }

    /// Returns a copy with an explicit height.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidHeight` unless `height` is positive.
    pub fn with_height(mut self, height: f64) -> Result<Self> {
        check_height(height)?;
        self.height = Some(height);
        Ok(self)
    }

    /// Returns a copy whose top slopes to `height` at its end point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidHeight` unless `height` is positive.
    pub fn with_height_at_end(mut self, height: f64) -> Result<Self> {
        check_height(height)?;
        self.height_at_end = Some(height);
        Ok(self)
    }

    /// Returns a copy placed on `level`.
    #[must_use]
    pub fn with_level(mut self, level: LevelId) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Returns the end point matching a join slot.
    #[must_use]
    pub fn endpoint(&self, slot: JoinSlot) -> Point2 {
        match slot {
            JoinSlot::Start => self.start,
            JoinSlot::End => self.end,
        }
    }

    /// Signed arc extent in radians, `None` for walls created straight.
    #[must_use]
    pub fn arc_extent(&self) -> Option<f64> {
        self.arc_extent
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    #[must_use]
    pub fn height_at_end(&self) -> Option<f64> {
        self.height_at_end
    }

    #[must_use]
    pub fn level(&self) -> Option<LevelId> {
        self.level
    }

    /// Wall joined at the given end, if any.
    #[must_use]
    pub fn joined_wall(&self, slot: JoinSlot) -> Option<WallId> {
        match slot {
            JoinSlot::Start => self.wall_at_start,
            JoinSlot::End => self.wall_at_end,
        }
    }

    #[must_use]
    pub fn wall_at_start(&self) -> Option<WallId> {
        self.wall_at_start
    }

    #[must_use]
    pub fn wall_at_end(&self) -> Option<WallId> {
        self.wall_at_end
    }

    pub(crate) fn joined_wall_mut(&mut self, slot: JoinSlot) -> &mut Option<WallId> {
        match slot {
            JoinSlot::Start => &mut self.wall_at_start,
            JoinSlot::End => &mut self.wall_at_end,
        }
    }

    #[must_use]
    pub fn baseboard(&self, side: WallSide) -> Option<&Rc<Baseboard>> {
        match side {
            WallSide::Left => self.left_baseboard.as_ref(),
            WallSide::Right => self.right_baseboard.as_ref(),
        }
    }

    pub(crate) fn baseboard_mut(&mut self, side: WallSide) -> &mut Option<Rc<Baseboard>> {
        match side {
            WallSide::Left => &mut self.left_baseboard,
            WallSide::Right => &mut self.right_baseboard,
        }
    }

    /// Baseboard thickness added on `side`, zero when it has none.
    #[must_use]
    pub fn baseboard_thickness(&self, side: WallSide) -> f64 {
        self.baseboard(side).map_or(0.0, |b| b.thickness())
    }

    #[must_use]
    pub fn has_baseboards(&self) -> bool {
        self.left_baseboard.is_some() || self.right_baseboard.is_some()
    }

    #[must_use]
    pub fn start_point_to_end_point_distance(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the signed extent when the wall is drawn as an arc.
    ///
    /// A zero extent, or end points closer than `sqrt(min_chord_sq)`, make the
    /// wall straight.
    #[must_use]
    pub fn round_extent(&self, min_chord_sq: f64) -> Option<f64> {
        self.arc_extent.filter(|&extent| {
            extent != 0.0 && (self.end - self.start).norm_squared() > min_chord_sq
        })
    }

    /// Center of the circle supporting a round wall.
    #[must_use]
    pub fn arc_circle_center(&self) -> Option<Point2> {
        self.round_extent(0.0)
            .map(|extent| arc_circle_center(&self.start, &self.end, extent))
    }

    /// Length of the wall centerline, following the arc for round walls.
    #[must_use]
    pub fn length(&self) -> f64 {
        match (self.round_extent(0.0), self.arc_circle_center()) {
            (Some(extent), Some(center)) => arc_length((self.start - center).norm(), extent),
            _ => self.start_point_to_end_point_distance(),
        }
    }

    /// Whether the wall top slopes from start to end.
    #[must_use]
    pub fn is_trapezoidal(&self) -> bool {
        match (self.height, self.height_at_end) {
            (Some(h), Some(e)) => (h - e).abs() > f64::EPSILON,
            (None, Some(_)) => true,
            _ => false,
        }
    }

    /// Highest point of the wall top, using `default_height` when unset.
    #[must_use]
    pub fn max_height(&self, default_height: f64) -> f64 {
        let height = self.height.unwrap_or(default_height);
        self.height_at_end.map_or(height, |end| height.max(end))
    }

    /// Copy with the same geometry and appearance but no joins or cached outline.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            wall_at_start: None,
            wall_at_end: None,
            cache: OutlineCache::default(),
            ..self.clone()
        }
    }
}

pub(crate) fn check_finite(what: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { what, value }.into())
    }
}

pub(crate) fn check_point(what: &'static str, p: &Point2) -> Result<()> {
    check_finite(what, p.x)?;
    check_finite(what, p.y)
}

/// Arc extents must stay strictly within one turn: the supporting circle of a
/// full turn through two distinct points is unbounded.
pub(crate) fn check_arc_extent(extent: f64) -> Result<()> {
    check_finite("arc extent", extent)?;
    if extent.abs() < TAU {
        Ok(())
    } else {
        Err(GeometryError::InvalidArcExtent(extent).into())
    }
}

pub(crate) fn check_thickness(thickness: f64) -> Result<()> {
    if thickness.is_finite() && thickness > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidThickness(thickness).into())
    }
}

pub(crate) fn check_height(height: f64) -> Result<()> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidHeight(height).into())
    }
}
