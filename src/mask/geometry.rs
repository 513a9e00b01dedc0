//! Binary occupancy masks and their extents.

use crate::foundation::error::{SynthError, SynthResult};

/// Binary occupancy grid: `1` where a stroke has ink, `0` elsewhere. Row-major.
///
/// Masks are never mutated once built; combining masks always produces a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Inclusive first/last occupied column and row of a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaskBounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl MaskBounds {
    /// Pixel extent `(max_x - min_x + 1, max_y - min_y + 1)`; a lone pixel spans 1.
    pub fn span(&self) -> (u32, u32) {
        (self.max_x - self.min_x + 1, self.max_y - self.min_y + 1)
    }

    pub fn max_span(&self) -> u32 {
        let (h, v) = self.span();
        h.max(v)
    }
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(u8::from(f(x, y)));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap row-major cells; any non-zero cell counts as occupied.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u8>) -> SynthResult<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(SynthError::validation(format!(
                "mask data has {} cells, expected {width}x{height}",
                data.len()
            )));
        }
        for v in &mut data {
            *v = u8::from(*v != 0);
        }
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

    /// Row-major cells, each `0` or `1`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.data[(y as usize) * (self.width as usize) + (x as usize)] != 0
    }

    /// Number of occupied pixels.
    pub fn area(&self) -> usize {
        self.data.iter().filter(|v| **v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|v| *v == 0)
    }

    /// Pixel-wise AND. Both masks must share dimensions; the result takes `self`'s.
    pub fn intersection(&self, other: &Mask) -> Mask {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        let mut data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| u8::from(*a != 0 && *b != 0))
            .collect::<Vec<_>>();
        data.resize(self.data.len(), 0);
        Mask {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Occupied extents, or `None` for an empty mask.
    pub fn bounds(&self) -> Option<MaskBounds> {
        let w = self.width as usize;
        if w == 0 {
            return None;
        }
        let mut out: Option<MaskBounds> = None;
        for (y, row) in self.data.chunks_exact(w).enumerate() {
            let Some(first) = row.iter().position(|v| *v != 0) else {
                continue;
            };
            let last = row.iter().rposition(|v| *v != 0).unwrap_or(first);
            let (first, last, y) = (first as u32, last as u32, y as u32);
            out = Some(match out {
                None => MaskBounds {
                    min_x: first,
                    max_x: last,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => MaskBounds {
                    min_x: b.min_x.min(first),
                    max_x: b.max_x.max(last),
                    min_y: b.min_y,
                    max_y: y,
                },
            });
        }
        out
    }

    /// `(horizontal span, vertical span)`, or `None` for an empty mask.
    pub fn span(&self) -> Option<(u32, u32)> {
        self.bounds().map(|b| b.span())
    }

    /// Grey image with occupied pixels at 255.
    pub fn to_gray_image(&self) -> image::GrayImage {
        let data = self.data.iter().map(|v| if *v != 0 { 255 } else { 0 }).collect();
        image::GrayImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/geometry.rs"]
mod tests;
