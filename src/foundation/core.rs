use crate::foundation::error::{SynthError, SynthResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical coordinate rectangle that strokes are placed within before rasterization.
///
/// Rasterization maps the viewbox onto a square `size_px x size_px` canvas, scaling each axis
/// independently. All conversions between viewbox units and raster pixels go through the helpers
/// on this type.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            min_y: 0.0,
            width: 1010.0,
            height: 1000.0,
        }
    }
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> SynthResult<Self> {
        let vb = Self {
            min_x,
            min_y,
            width,
            height,
        };
        vb.validate()?;
        Ok(vb)
    }

    pub fn validate(&self) -> SynthResult<()> {
        for (name, v) in [
            ("min_x", self.min_x),
            ("min_y", self.min_y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !v.is_finite() {
                return Err(SynthError::validation(format!(
                    "viewbox {name} must be finite"
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SynthError::validation("viewbox width/height must be > 0"));
        }
        Ok(())
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x(), self.max_y())
    }

    /// Value for the SVG `viewBox` attribute.
    pub fn to_svg_attr(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }

    /// Viewbox units per raster pixel, per axis.
    pub fn units_per_pixel(&self, size_px: u32) -> Vec2 {
        let size = f64::from(size_px.max(1));
        Vec2::new(self.width / size, self.height / size)
    }

    pub fn viewbox_to_pixel(&self, p: Point, size_px: u32) -> Point {
        let upp = self.units_per_pixel(size_px);
        Point::new((p.x - self.min_x) / upp.x, (p.y - self.min_y) / upp.y)
    }

    pub fn pixel_to_viewbox(&self, p: Point, size_px: u32) -> Point {
        let upp = self.units_per_pixel(size_px);
        Point::new(self.min_x + p.x * upp.x, self.min_y + p.y * upp.y)
    }

    /// Convert a displacement in raster pixels into viewbox units (no origin offset).
    pub fn pixel_delta_to_viewbox(&self, d: Vec2, size_px: u32) -> Vec2 {
        let upp = self.units_per_pixel(size_px);
        Vec2::new(d.x * upp.x, d.y * upp.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
