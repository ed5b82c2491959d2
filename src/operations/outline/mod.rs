//! Wall outline generation.
//!
//! An outline is a closed polygon with an even number of points: the first
//! half runs along the left side from the wall start to its end, the second
//! half runs back along the right side from the end to the start.
//!
//! ```text
//!   0 ──────────────── n/2-1        left side
//!   │                     │
//!   n-1 ────────────── n/2          right side
//! ```

mod joint;
mod unjoined;

pub use joint::{joined_outline, JoinedNeighbor};
pub use unjoined::unjoined_outline;

use crate::math::intersect_2d::SlopeTolerance;

/// How round walls are split into straight steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcStepPolicy {
    /// Equal steps, adjusted so their count divides the arc exactly.
    #[default]
    Symmetric,
    /// Steps of the computed size from the start, plus one final point at
    /// the end, leaving a shorter last step.
    Asymmetric,
}

/// Parameters controlling outline generation and corner snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineParams {
    /// Arc stepping policy for round walls.
    pub arc_step_policy: ArcStepPolicy,
    /// Slope thresholds for corner intersections.
    pub slope: SlopeTolerance,
    /// Maximum per-axis gap under which a corner is replaced by the joined
    /// wall's cached corner.
    pub weld_epsilon: f64,
    /// A snapped corner may move at most this multiple of the wall thickness.
    pub corner_limit_factor: f64,
    /// Maximum distance between two end points for a join to take effect.
    pub join_tolerance: f64,
    /// Squared chord length under which a round wall is drawn straight.
    pub min_arc_chord_sq: f64,
    /// Upper bound on the number of steps of a round wall.
    pub max_arc_steps: u32,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            arc_step_policy: ArcStepPolicy::Symmetric,
            slope: SlopeTolerance::default(),
            weld_epsilon: 0.01,
            corner_limit_factor: 2.0,
            join_tolerance: 1e-3,
            min_arc_chord_sq: 1e-10,
            max_arc_steps: 1024,
        }
    }
}
