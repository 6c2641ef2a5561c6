//! Error types for the physics core.

use thiserror::Error;

use crate::shapes::ShapeType;

/// Physics core errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Malformed polygon: too few vertices, wrong winding, non-convex,
    /// repeated vertices or self-intersecting outline.
    #[error("Invalid polygon geometry: {0}")]
    InvalidGeometry(String),

    /// The collision dispatcher has no routine for this pair of shape kinds.
    #[error("No collision routine for {0:?} vs {1:?}")]
    InvalidShapePair(ShapeType, ShapeType),

    /// Invalid step configuration
    #[error("Invalid step configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
