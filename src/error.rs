use thiserror::Error;

/// Top-level error type for the wall engine.
#[derive(Debug, Error)]
pub enum WallkitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors raised when a geometric input violates a precondition.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("wall thickness must be positive, got {0}")]
    InvalidThickness(f64),

    #[error("wall height must be positive, got {0}")]
    InvalidHeight(f64),

    #[error("arc extent must be less than a full turn, got {0}")]
    InvalidArcExtent(f64),
}

/// Errors related to the plan object graph.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("a wall cannot be joined to itself")]
    SelfJoin,
}

/// Convenience type alias for results using [`WallkitError`].
pub type Result<T> = std::result::Result<T, WallkitError>;
