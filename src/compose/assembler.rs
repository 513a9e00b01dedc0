use std::sync::Arc;

use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    compose::{
        acceptance::{Verdict, evaluate},
        boxy::compose_boxy,
        label::LabelMask,
    },
    config::settings::SynthConfig,
    foundation::error::{SynthError, SynthResult},
    mask::geometry::Mask,
    render::{
        canvas::StrokeCanvas,
        document::TransformedStroke,
        raster::{RasterImage, Rasterizer, ResvgRasterizer},
    },
    sampling::affine::AffineSampler,
    strokes::library::StrokeLibrary,
};

/// Accepted strokes of a composite with their individually rendered masks, index-aligned.
#[derive(Clone, Debug, Default)]
pub struct StrokeSet {
    pub strokes: Vec<TransformedStroke>,
    pub masks: Vec<Mask>,
}

impl StrokeSet {
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    fn push(&mut self, stroke: TransformedStroke, mask: Mask) {
        self.strokes.push(stroke);
        self.masks.push(mask);
    }
}

/// One synthesized training example.
#[derive(Clone, Debug)]
pub struct CompositeSample {
    /// All accepted strokes rendered together.
    pub image: RasterImage,
    /// Per-pixel class (0 background, 1 single stroke, 2 overlap).
    pub label: LabelMask,
    pub strokes: StrokeSet,
    /// Whether the composite was seeded by boxy mode.
    pub boxy: bool,
    /// Candidate strokes drawn by rejection sampling.
    pub attempts: usize,
}

/// Composes random strokes from a shared library into labelled samples.
///
/// The generator itself is immutable; all randomness comes from the generator handle passed to
/// each call, so one instance can serve any number of workers.
pub struct CompositeGenerator {
    library: Arc<StrokeLibrary>,
    cfg: SynthConfig,
    sampler: AffineSampler,
    rasterizer: Arc<dyn Rasterizer>,
}

impl CompositeGenerator {
    pub fn new(library: Arc<StrokeLibrary>, cfg: SynthConfig) -> SynthResult<Self> {
        cfg.validate()?;
        let sampler = AffineSampler::new(cfg.sampler.clone())?;
        if cfg.boxy_probability > 0.0 && !library.supports_boxy() {
            tracing::warn!(
                "stroke library lacks corner/vertical/horizontal strokes, boxy mode disabled"
            );
        }
        Ok(Self {
            library,
            cfg,
            sampler,
            rasterizer: Arc::new(ResvgRasterizer),
        })
    }

    /// Swap the rasterizer backend.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn config(&self) -> &SynthConfig {
        &self.cfg
    }

    pub fn library(&self) -> &StrokeLibrary {
        &self.library
    }

    pub fn canvas(&self) -> StrokeCanvas<'_> {
        StrokeCanvas {
            rasterizer: self.rasterizer.as_ref(),
            viewbox: &self.cfg.viewbox,
            size_px: self.cfg.size_px,
            mask_threshold: self.cfg.mask_threshold,
        }
    }

    /// Draw a target stroke count from the configured range.
    pub fn sample_stroke_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(self.cfg.strokes.min..=self.cfg.strokes.max)
    }

    /// Generate one composite with a randomly drawn stroke count.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SynthResult<CompositeSample> {
        let target = self.sample_stroke_count(rng);
        self.assemble(target, rng)
    }

    /// Rejection-sample strokes until `target` of them have been accepted.
    ///
    /// With probability `boxy_probability` (and `target >= 3`) the composite starts from a boxy
    /// triple. Every further candidate must pass the overlap heuristic against all accepted
    /// strokes; a candidate whose mask is empty is discarded. A `target` of zero is a
    /// [`SynthError::Validation`]; fails with [`SynthError::Assembly`] once `max_attempts`
    /// candidates have been drawn.
    #[tracing::instrument(skip(self, rng), fields(size_px = self.cfg.size_px))]
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        target: usize,
        rng: &mut R,
    ) -> SynthResult<CompositeSample> {
        if target == 0 {
            return Err(SynthError::validation("target stroke count must be >= 1"));
        }
        let canvas = self.canvas();
        let mut accepted = StrokeSet::default();
        let mut boxy = false;

        if target >= 3
            && self.library.supports_boxy()
            && self.cfg.boxy_probability > 0.0
            && rng.random_bool(self.cfg.boxy_probability)
        {
            accepted = compose_boxy(
                &self.library,
                &self.sampler,
                &canvas,
                &self.cfg.boxy,
                self.cfg.max_attempts,
                rng,
            )?;
            boxy = true;
        }

        let mut attempts = 0usize;
        while accepted.len() < target {
            if attempts >= self.cfg.max_attempts {
                return Err(SynthError::Assembly {
                    accepted: accepted.len(),
                    target,
                    attempts,
                });
            }
            attempts += 1;

            let stroke = self
                .library
                .general()
                .choose(rng)
                .ok_or_else(|| SynthError::library("stroke library has no strokes"))?;
            let params = self
                .sampler
                .sample(stroke, &self.cfg.viewbox, false, rng);
            let candidate = TransformedStroke::new(stroke.clone(), params);
            let mask = canvas.mask(&candidate)?;

            if mask.is_empty() {
                tracing::debug!(stroke = %stroke.source(), "rejected: empty mask");
                continue;
            }
            match evaluate(&mask, &accepted.masks, &self.cfg.acceptance) {
                Verdict::Accept => accepted.push(candidate, mask),
                Verdict::Reject { against, reason } => {
                    tracing::debug!(stroke = %stroke.source(), against, ?reason, "rejected");
                }
            }
        }

        let image = canvas.render(&accepted.strokes)?;
        let label = LabelMask::from_masks(self.cfg.size_px, self.cfg.size_px, &accepted.masks)?;
        Ok(CompositeSample {
            image,
            label,
            strokes: accepted,
            boxy,
            attempts,
        })
    }
}

impl std::fmt::Debug for CompositeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeGenerator")
            .field("strokes", &self.library.general().len())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/assembler.rs"]
mod tests;
