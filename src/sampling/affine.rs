//! Random placement of a stroke inside the viewbox.

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

use crate::{
    foundation::{
        core::{Affine, Vec2, ViewBox},
        error::{SynthError, SynthResult},
    },
    strokes::path::StrokePath,
};

/// Placement of one stroke in viewbox space.
///
/// Applied as `translate * rotate * skewX * skewY * scale`, the same order the SVG writer emits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AffineParams {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
    pub skew_x_deg: f64,
    pub skew_y_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for AffineParams {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate_deg: 0.0,
            skew_x_deg: 0.0,
            skew_y_deg: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl AffineParams {
    /// Copy of these params with the translation shifted by `delta` viewbox units.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            translate_x: self.translate_x + delta.x,
            translate_y: self.translate_y + delta.y,
            ..*self
        }
    }

    pub fn to_affine(&self) -> Affine {
        let skew_x = Affine::new([1.0, 0.0, self.skew_x_deg.to_radians().tan(), 1.0, 0.0, 0.0]);
        let skew_y = Affine::new([1.0, self.skew_y_deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]);
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::rotate(self.rotate_deg.to_radians())
            * skew_x
            * skew_y
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Value for an SVG `transform` attribute.
    pub fn to_svg_transform(&self) -> String {
        format!(
            "translate({}, {}) rotate({}) skewX({}) skewY({}) scale({}, {})",
            self.translate_x,
            self.translate_y,
            self.rotate_deg,
            self.skew_x_deg,
            self.skew_y_deg,
            self.scale_x,
            self.scale_y
        )
    }
}

/// Distribution parameters for [`AffineSampler`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Center of the Gaussian the horizontal scale is drawn from.
    pub scale_mean: f64,
    pub scale_std_dev: f64,
    /// Floor applied to the drawn scale.
    pub scale_min: f64,
    /// Ceiling applied to the drawn scale.
    pub scale_max: f64,
    /// `scale_y = scale_x * U(1 - aspect_jitter, 1 + aspect_jitter)`.
    pub aspect_jitter: f64,
    /// Rotation is drawn from `U(-max_rotate_deg, max_rotate_deg)`.
    pub max_rotate_deg: f64,
    /// Both skews are drawn from `U(-max_skew_deg, max_skew_deg)`.
    pub max_skew_deg: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            scale_mean: 0.3,
            scale_std_dev: 0.1,
            scale_min: 0.1,
            scale_max: 1.0,
            aspect_jitter: 0.1,
            max_rotate_deg: 10.0,
            max_skew_deg: 10.0,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> SynthResult<()> {
        for (name, v) in [
            ("scale_mean", self.scale_mean),
            ("scale_std_dev", self.scale_std_dev),
            ("scale_min", self.scale_min),
            ("scale_max", self.scale_max),
            ("aspect_jitter", self.aspect_jitter),
            ("max_rotate_deg", self.max_rotate_deg),
            ("max_skew_deg", self.max_skew_deg),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SynthError::validation(format!(
                    "sampler {name} must be finite and >= 0"
                )));
            }
        }
        if self.scale_min <= 0.0 || self.scale_min > self.scale_max {
            return Err(SynthError::validation(
                "sampler scale bounds must satisfy 0 < scale_min <= scale_max",
            ));
        }
        if self.aspect_jitter >= 1.0 {
            return Err(SynthError::validation(
                "sampler aspect_jitter must be < 1",
            ));
        }
        if self.max_skew_deg >= 90.0 {
            return Err(SynthError::validation("sampler max_skew_deg must be < 90"));
        }
        Ok(())
    }
}

/// Draws randomized [`AffineParams`] for strokes.
#[derive(Clone, Debug)]
pub struct AffineSampler {
    cfg: SamplerConfig,
    scale: Normal<f64>,
}

impl AffineSampler {
    pub fn new(cfg: SamplerConfig) -> SynthResult<Self> {
        cfg.validate()?;
        let scale = Normal::new(cfg.scale_mean, cfg.scale_std_dev)
            .map_err(|e| SynthError::validation(format!("sampler scale distribution: {e}")))?;
        Ok(Self { cfg, scale })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.cfg
    }

    /// Sample a placement for `stroke` that keeps its scaled bounding box inside `viewbox`.
    ///
    /// With `axis_aligned` the rotation and both skews are exactly zero.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        stroke: &StrokePath,
        viewbox: &ViewBox,
        axis_aligned: bool,
        rng: &mut R,
    ) -> AffineParams {
        let bbox = stroke.bbox();
        let mid = stroke.midpoint();

        let (rotate_deg, skew_x_deg, skew_y_deg) = if axis_aligned {
            (0.0, 0.0, 0.0)
        } else {
            let r = self.cfg.max_rotate_deg;
            let k = self.cfg.max_skew_deg;
            (
                uniform(rng, -r, r),
                uniform(rng, -k, k),
                uniform(rng, -k, k),
            )
        };

        let mut scale_x = self
            .scale
            .sample(rng)
            .clamp(self.cfg.scale_min, self.cfg.scale_max);
        let j = self.cfg.aspect_jitter;
        let mut scale_y = scale_x * uniform(rng, 1.0 - j, 1.0 + j);

        // An oversized stroke would leave no valid offset; shrink it until it fits.
        let fit = (viewbox.width / (scale_x * bbox.width()))
            .min(viewbox.height / (scale_y * bbox.height()));
        if fit.is_finite() && fit < 1.0 {
            tracing::warn!(
                stroke = %stroke.source(),
                fit,
                "scaled stroke exceeds viewbox, clamping scale"
            );
            scale_x *= fit;
            scale_y *= fit;
        }

        let offset_x = axis_offset(
            rng,
            mid.x,
            scale_x,
            (bbox.x0, bbox.x1),
            (viewbox.min_x, viewbox.max_x()),
        );
        let offset_y = axis_offset(
            rng,
            mid.y,
            scale_y,
            (bbox.y0, bbox.y1),
            (viewbox.min_y, viewbox.max_y()),
        );

        AffineParams {
            translate_x: (1.0 - scale_x) * mid.x + offset_x,
            translate_y: (1.0 - scale_y) * mid.y + offset_y,
            rotate_deg,
            skew_x_deg,
            skew_y_deg,
            scale_x,
            scale_y,
        }
    }
}

/// Random offset along one axis for a stroke scaled about `mid`.
///
/// The offset range keeps the unscaled box inside the viewbox; when that range is empty it
/// falls back to the range that keeps the scaled box inside.
fn axis_offset<R: Rng + ?Sized>(
    rng: &mut R,
    mid: f64,
    scale: f64,
    (stroke_min, stroke_max): (f64, f64),
    (vb_min, vb_max): (f64, f64),
) -> f64 {
    let lo = vb_min - stroke_min;
    let hi = vb_max - stroke_max;
    if lo <= hi {
        return uniform(rng, lo, hi);
    }
    let scaled_min = mid + scale * (stroke_min - mid);
    let scaled_max = mid + scale * (stroke_max - mid);
    uniform(rng, vb_min - scaled_min, vb_max - scaled_max)
}

/// `U(lo, hi)`, or `lo` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/affine.rs"]
mod tests;
