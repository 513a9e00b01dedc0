//! Vector documents and their rasterization.

/// Square raster target shared by all strokes of a composite.
pub mod canvas;
/// SVG document assembly.
pub mod document;
/// Rasterizer seam and the resvg-backed implementation.
pub mod raster;
