pub mod error;
pub mod math;
pub mod operations;
pub mod plan;

pub use error::{Result, WallkitError};
pub use operations::outline::{ArcStepPolicy, OutlineParams};
pub use plan::{
    Baseboard, Level, LevelId, Wall, WallChange, WallId, WallProperty, WallSide, WallStore,
};
