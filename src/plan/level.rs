slotmap::new_key_type! {
    /// Unique identifier for a level in the wall store.
    pub struct LevelId;
}

/// A floor of the plan.
///
/// Levels sharing the same elevation are ordered by `elevation_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Display name.
    pub name: String,
    /// Elevation of the level floor.
    pub elevation: f64,
    /// Thickness of the floor slab.
    pub floor_thickness: f64,
    /// Default height of the level.
    pub height: f64,
    /// Rank among levels at the same elevation.
    pub elevation_index: i32,
}

impl Level {
    /// Creates a level at the given elevation.
    #[must_use]
    pub fn new(name: impl Into<String>, elevation: f64, floor_thickness: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            elevation,
            floor_thickness,
            height,
            elevation_index: 0,
        }
    }

    /// Returns a copy with the given elevation index.
    #[must_use]
    pub fn with_elevation_index(mut self, index: i32) -> Self {
        self.elevation_index = index;
        self
    }
}
