use crate::{
    foundation::error::{SynthError, SynthResult},
    mask::geometry::Mask,
};

/// Per-pixel class grid of a composite: background, one stroke, or two-or-more strokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LabelMask {
    pub const BACKGROUND: u8 = 0;
    pub const SINGLE: u8 = 1;
    pub const OVERLAP: u8 = 2;

    /// Sum stroke masks elementwise, collapsing every count above two into [`Self::OVERLAP`].
    pub fn from_masks(width: u32, height: u32, masks: &[Mask]) -> SynthResult<Self> {
        let mut sums = vec![0u32; (width as usize) * (height as usize)];
        for (i, m) in masks.iter().enumerate() {
            if m.dimensions() != (width, height) {
                return Err(SynthError::validation(format!(
                    "stroke mask {i} is {}x{}, label is {width}x{height}",
                    m.width(),
                    m.height()
                )));
            }
            for (s, v) in sums.iter_mut().zip(m.data()) {
                *s += u32::from(*v);
            }
        }
        let data = sums
            .into_iter()
            .map(|s| s.min(u32::from(Self::OVERLAP)) as u8)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return Self::BACKGROUND;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Pixel counts for background, single and overlap.
    pub fn class_counts(&self) -> [usize; 3] {
        let mut out = [0usize; 3];
        for v in &self.data {
            out[usize::from(*v).min(2)] += 1;
        }
        out
    }

    /// Single-channel target in `[0, 1]` (class / 2).
    pub fn to_unit_f32(&self) -> Vec<f32> {
        self.data
            .iter()
            .map(|v| f32::from(*v) / f32::from(Self::OVERLAP))
            .collect()
    }

    /// Viewable grey image: 0, 127, 254.
    pub fn to_gray_image(&self) -> image::GrayImage {
        let data = self.data.iter().map(|v| v.saturating_mul(127)).collect();
        image::GrayImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/label.rs"]
mod tests;
