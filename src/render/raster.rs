use anyhow::Context as _;

use crate::{
    foundation::error::{SynthError, SynthResult},
    mask::geometry::Mask,
};

/// Rendered ink coverage, one 8-bit channel (the SVG alpha channel).
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pub ink: image::GrayImage,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.ink.width()
    }

    pub fn height(&self) -> u32 {
        self.ink.height()
    }

    /// Ink intensity at a pixel in `[0, 1]`.
    pub fn intensity(&self, x: u32, y: u32) -> f32 {
        f32::from(self.ink.get_pixel(x, y).0[0]) / 255.0
    }

    /// Occupancy mask of pixels whose ink intensity is strictly above `threshold`.
    pub fn to_mask(&self, threshold: f32) -> Mask {
        let data = self
            .ink
            .as_raw()
            .iter()
            .map(|v| u8::from(f32::from(*v) / 255.0 > threshold))
            .collect::<Vec<_>>();
        Mask::from_raw(self.width(), self.height(), data)
            .unwrap_or_else(|_| Mask::empty(self.width(), self.height()))
    }

    /// Intensities in `[0, 1]`, row-major.
    pub fn to_unit_f32(&self) -> Vec<f32> {
        self.ink.as_raw().iter().map(|v| f32::from(*v) / 255.0).collect()
    }
}

/// Turns an SVG document into a raster of the requested size.
///
/// The document's viewbox is stretched onto the full `width x height` canvas.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> SynthResult<RasterImage>;
}

/// CPU rasterizer backed by `usvg` + `resvg`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> SynthResult<RasterImage> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg, &opts).context("parse svg document")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SynthError::render(format!("failed to allocate {width}x{height} pixmap")))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let alpha = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
        let ink = image::GrayImage::from_raw(width, height, alpha)
            .ok_or_else(|| SynthError::render("rasterized buffer has unexpected size"))?;
        Ok(RasterImage { ink })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
