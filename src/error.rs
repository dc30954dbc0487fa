//! Error types for physics operations.

use core::fmt;

/// Errors that can occur when constructing physics objects.
///
/// The tick loop itself never fails: degenerate geometry is handled by
/// epsilon guards that skip the affected pair or joint. These errors only
/// surface invalid configuration before an object enters the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// A polygon body needs at least 3 vertices.
    InsufficientVertices { count: usize },
    /// A polygon's vertices enclose no area.
    DegeneratePolygon,
    /// A soft body needs at least 3 segments.
    InsufficientSegments,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InsufficientVertices { count } => {
                write!(f, "polygon needs at least 3 vertices (got {})", count)
            }
            PhysicsError::DegeneratePolygon => write!(f, "polygon vertices enclose no area"),
            PhysicsError::InsufficientSegments => write!(f, "soft body needs at least 3 segments"),
        }
    }
}
