use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{GeometryError, Result};

/// Trim strip running along one side of a wall.
///
/// Baseboards are immutable values compared by value, so one instance can be
/// shared by any number of walls.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseboard {
    thickness: f64,
    height: f64,
    color: Option<u32>,
    texture: Option<String>,
}

impl Baseboard {
    /// Creates a baseboard with the given thickness and height.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidThickness` or `GeometryError::InvalidHeight`
    /// when a dimension is not a positive finite number.
    pub fn new(thickness: f64, height: f64) -> Result<Self> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(GeometryError::InvalidThickness(thickness).into());
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(GeometryError::InvalidHeight(height).into());
        }
        Ok(Self {
            thickness,
            height,
            color: None,
            texture: None,
        })
    }

    /// Returns a copy painted with an RGB color.
    #[must_use]
    pub fn with_color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }

    /// Returns a copy covered with the named texture.
    #[must_use]
    pub fn with_texture(mut self, name: impl Into<String>) -> Self {
        self.texture = Some(name.into());
        self
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn color(&self) -> Option<u32> {
        self.color
    }

    #[must_use]
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    fn key(&self) -> BaseboardKey {
        BaseboardKey {
            thickness: self.thickness.to_bits(),
            height: self.height.to_bits(),
            color: self.color,
            texture: self.texture.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BaseboardKey {
    thickness: u64,
    height: u64,
    color: Option<u32>,
    texture: Option<String>,
}

/// Value-keyed interning table for baseboards, owned by the plan.
#[derive(Debug, Default)]
pub struct BaseboardTable {
    entries: HashMap<BaseboardKey, Rc<Baseboard>>,
}

impl BaseboardTable {
    /// Returns the shared instance equal to `baseboard`, inserting it if needed.
    pub fn intern(&mut self, baseboard: Baseboard) -> Rc<Baseboard> {
        Rc::clone(
            self.entries
                .entry(baseboard.key())
                .or_insert_with(|| Rc::new(baseboard)),
        )
    }

    /// Number of distinct baseboards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries no wall refers to anymore.
    pub fn purge_unused(&mut self) {
        self.entries.retain(|_, b| Rc::strong_count(b) > 1);
    }
}
