use std::path::Path;

use anyhow::Context as _;

use crate::{
    compose::{acceptance::AcceptanceConfig, boxy::BoxyConfig},
    foundation::{
        core::ViewBox,
        error::{SynthError, SynthResult},
    },
    sampling::affine::SamplerConfig,
};

/// Inclusive range the per-composite stroke count is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeCountRange {
    pub min: usize,
    pub max: usize,
}

impl Default for StrokeCountRange {
    fn default() -> Self {
        Self { min: 3, max: 4 }
    }
}

/// Full generator configuration. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub viewbox: ViewBox,
    /// Output images and masks are `size_px x size_px`.
    pub size_px: u32,
    /// Ink intensity above which a pixel belongs to a stroke mask.
    pub mask_threshold: f32,
    pub strokes: StrokeCountRange,
    /// Share of composites seeded by boxy mode.
    pub boxy_probability: f64,
    /// Candidate draws per composite before giving up.
    pub max_attempts: usize,
    pub sampler: SamplerConfig,
    pub acceptance: AcceptanceConfig,
    pub boxy: BoxyConfig,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            viewbox: ViewBox::default(),
            size_px: 256,
            mask_threshold: 0.3,
            strokes: StrokeCountRange::default(),
            boxy_probability: 0.05,
            max_attempts: 1000,
            sampler: SamplerConfig::default(),
            acceptance: AcceptanceConfig::default(),
            boxy: BoxyConfig::default(),
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> SynthResult<()> {
        self.viewbox.validate()?;
        if self.size_px == 0 {
            return Err(SynthError::validation("size_px must be > 0"));
        }
        if !self.mask_threshold.is_finite() || !(0.0..1.0).contains(&self.mask_threshold) {
            return Err(SynthError::validation(
                "mask_threshold must be in [0, 1)",
            ));
        }
        if self.strokes.min == 0 || self.strokes.min > self.strokes.max {
            return Err(SynthError::validation(
                "strokes range must satisfy 1 <= min <= max",
            ));
        }
        if !self.boxy_probability.is_finite() || !(0.0..=1.0).contains(&self.boxy_probability) {
            return Err(SynthError::validation(
                "boxy_probability must be in [0, 1]",
            ));
        }
        if self.max_attempts == 0 {
            return Err(SynthError::validation("max_attempts must be > 0"));
        }
        self.sampler.validate()?;
        self.acceptance.validate()?;
        self.boxy.validate()?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> SynthResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SynthError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> SynthResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> SynthResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
