//! Random affine placement of strokes.

pub mod affine;
