//! Structural "box" composition: a corner stroke closed by a vertical and a horizontal stroke.
//!
//! Random placement almost never produces right-angle junctions like the ones in 口, so a small
//! share of composites is seeded with this arrangement instead.

use rand::{Rng, seq::IndexedRandom as _};
use rand_distr::{Distribution as _, Normal};

use crate::{
    compose::assembler::StrokeSet,
    foundation::{
        core::Vec2,
        error::{SynthError, SynthResult},
    },
    mask::geometry::{Mask, MaskBounds},
    render::{canvas::StrokeCanvas, document::TransformedStroke},
    sampling::affine::AffineSampler,
    strokes::{library::StrokeLibrary, path::StrokePath},
};

/// Placement jitter for the aligned strokes, in viewbox units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoxyConfig {
    /// Standard deviation along the aligned stroke's own direction.
    pub align_sigma: f64,
    /// Standard deviation across the aligned stroke.
    pub cross_sigma: f64,
}

impl Default for BoxyConfig {
    fn default() -> Self {
        Self {
            align_sigma: 20.0,
            cross_sigma: 3.0,
        }
    }
}

impl BoxyConfig {
    pub fn validate(&self) -> SynthResult<()> {
        for (name, v) in [
            ("align_sigma", self.align_sigma),
            ("cross_sigma", self.cross_sigma),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SynthError::validation(format!(
                    "boxy {name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Which corner of the reference stroke a stroke is snapped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    TopLeft,
    BottomRight,
}

impl Anchor {
    fn of(self, b: &MaskBounds) -> (f64, f64) {
        match self {
            Self::TopLeft => (f64::from(b.min_x), f64::from(b.min_y)),
            Self::BottomRight => (f64::from(b.max_x), f64::from(b.max_y)),
        }
    }
}

/// Build the corner + vertical + horizontal triple.
///
/// The vertical stroke's top-left is snapped to the corner's top-left and the horizontal
/// stroke's bottom-right to the corner's bottom-right, then jittered. A draw whose masks come
/// out empty is retried, up to `max_attempts` times.
pub fn compose_boxy<R: Rng + ?Sized>(
    library: &StrokeLibrary,
    sampler: &AffineSampler,
    canvas: &StrokeCanvas<'_>,
    cfg: &BoxyConfig,
    max_attempts: usize,
    rng: &mut R,
) -> SynthResult<StrokeSet> {
    let along = Normal::new(0.0, cfg.align_sigma)
        .map_err(|e| SynthError::validation(format!("boxy align_sigma: {e}")))?;
    let across = Normal::new(0.0, cfg.cross_sigma)
        .map_err(|e| SynthError::validation(format!("boxy cross_sigma: {e}")))?;

    for _ in 0..max_attempts {
        let corner = pick(library.boxy(), rng, "corner")?;
        let vertical = pick(library.vertical(), rng, "vertical")?;
        let horizontal = pick(library.horizontal(), rng, "horizontal")?;

        let corner = TransformedStroke::new(
            corner.clone(),
            sampler.sample(&corner, canvas.viewbox, true, rng),
        );
        let corner_mask = canvas.mask(&corner)?;
        let Some(corner_bounds) = corner_mask.bounds() else {
            continue;
        };

        let jitter_v = Vec2::new(across.sample(rng), along.sample(rng));
        let Some((vertical, vertical_mask)) = snap(
            vertical,
            &corner_bounds,
            Anchor::TopLeft,
            jitter_v,
            sampler,
            canvas,
            rng,
        )?
        else {
            continue;
        };

        let jitter_h = Vec2::new(along.sample(rng), across.sample(rng));
        let Some((horizontal, horizontal_mask)) = snap(
            horizontal,
            &corner_bounds,
            Anchor::BottomRight,
            jitter_h,
            sampler,
            canvas,
            rng,
        )?
        else {
            continue;
        };

        return Ok(StrokeSet {
            strokes: vec![corner, vertical, horizontal],
            masks: vec![corner_mask, vertical_mask, horizontal_mask],
        });
    }

    Err(SynthError::Assembly {
        accepted: 0,
        target: 3,
        attempts: max_attempts,
    })
}

fn pick<R: Rng + ?Sized>(
    set: &[StrokePath],
    rng: &mut R,
    what: &str,
) -> SynthResult<StrokePath> {
    set.choose(rng)
        .cloned()
        .ok_or_else(|| SynthError::library(format!("boxy mode needs {what} strokes")))
}

/// Place `stroke` axis-aligned, then translate it so its `anchor` corner lands on the
/// reference's, plus `jitter` viewbox units. `None` when a mask comes out empty.
fn snap<R: Rng + ?Sized>(
    stroke: StrokePath,
    reference: &MaskBounds,
    anchor: Anchor,
    jitter: Vec2,
    sampler: &AffineSampler,
    canvas: &StrokeCanvas<'_>,
    rng: &mut R,
) -> SynthResult<Option<(TransformedStroke, Mask)>> {
    let params = sampler.sample(&stroke, canvas.viewbox, true, rng);
    let trial = canvas.mask(&TransformedStroke::new(stroke.clone(), params))?;
    let Some(bounds) = trial.bounds() else {
        return Ok(None);
    };

    let (rx, ry) = anchor.of(reference);
    let (sx, sy) = anchor.of(&bounds);
    let delta = canvas
        .viewbox
        .pixel_delta_to_viewbox(Vec2::new(rx - sx, ry - sy), canvas.size_px);

    let placed = TransformedStroke::new(stroke, params.translated(delta + jitter));
    let mask = canvas.mask(&placed)?;
    if mask.is_empty() {
        return Ok(None);
    }
    Ok(Some((placed, mask)))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/boxy.rs"]
mod tests;
