//! Binary masks: extents, intersection and boundary tracing.

pub mod contour;
pub mod geometry;
