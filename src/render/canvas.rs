use crate::{
    foundation::{core::ViewBox, error::SynthResult},
    mask::geometry::Mask,
    render::{
        document::{TransformedStroke, render_svg},
        raster::{RasterImage, Rasterizer},
    },
};

/// Square raster target for transformed strokes.
///
/// Bundles the viewbox, output size and mask threshold so every stroke of a composite is
/// rendered the same way.
#[derive(Clone, Copy)]
pub struct StrokeCanvas<'a> {
    pub rasterizer: &'a dyn Rasterizer,
    pub viewbox: &'a ViewBox,
    pub size_px: u32,
    pub mask_threshold: f32,
}

impl StrokeCanvas<'_> {
    pub fn svg(&self, strokes: &[TransformedStroke]) -> String {
        render_svg(strokes, self.viewbox)
    }

    /// Render all strokes together.
    pub fn render(&self, strokes: &[TransformedStroke]) -> SynthResult<RasterImage> {
        self.rasterizer
            .rasterize(&self.svg(strokes), self.size_px, self.size_px)
    }

    /// Render one stroke alone and threshold it.
    pub fn mask(&self, stroke: &TransformedStroke) -> SynthResult<Mask> {
        let img = self.render(std::slice::from_ref(stroke))?;
        Ok(img.to_mask(self.mask_threshold))
    }
}

impl std::fmt::Debug for StrokeCanvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeCanvas")
            .field("viewbox", self.viewbox)
            .field("size_px", &self.size_px)
            .field("mask_threshold", &self.mask_threshold)
            .finish_non_exhaustive()
    }
}
