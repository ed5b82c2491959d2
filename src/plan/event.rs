use super::wall::WallId;

/// Wall property reported by change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallProperty {
    Start,
    End,
    Thickness,
    ArcExtent,
    Height,
    HeightAtEnd,
    LeftSideBaseboard,
    RightSideBaseboard,
    WallAtStart,
    WallAtEnd,
    Level,
}

impl WallProperty {
    /// Whether a change of this property alters the wall outline.
    #[must_use]
    pub fn affects_outline(self) -> bool {
        !matches!(
            self,
            WallProperty::Height | WallProperty::HeightAtEnd | WallProperty::Level
        )
    }
}

/// Notification sent after a wall property changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallChange {
    pub wall: WallId,
    pub property: WallProperty,
}

/// Callback invoked synchronously for every wall change.
pub type WallListener = Box<dyn FnMut(&WallChange)>;
