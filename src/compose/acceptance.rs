//! Quality gate deciding whether a sampled stroke may join a composite.
//!
//! Strokes in real characters either do not touch, meet at a small junction, or cross briefly.
//! A pair whose overlap covers a large part of either stroke, or runs along most of either
//! stroke's extent, reads as a single stroke and would mislabel the segmentation target.

use crate::{
    foundation::error::{SynthError, SynthResult},
    mask::geometry::Mask,
};

/// Thresholds for the overlap heuristic.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AcceptanceConfig {
    /// Reject when `overlap area / stroke area` exceeds this for either stroke.
    pub max_overlap_ratio: f64,
    /// Reject when `overlap max span / stroke max span` exceeds this for either stroke.
    pub max_span_ratio: f64,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self {
            max_overlap_ratio: 0.25,
            max_span_ratio: 0.4,
        }
    }
}

impl AcceptanceConfig {
    pub fn validate(&self) -> SynthResult<()> {
        for (name, v) in [
            ("max_overlap_ratio", self.max_overlap_ratio),
            ("max_span_ratio", self.max_span_ratio),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SynthError::validation(format!(
                    "acceptance {name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The overlap covers too much of one stroke's area.
    OverlapArea,
    /// The overlap extends along too much of one stroke.
    OverlapSpan,
    /// The masks were rendered at different sizes.
    DimensionMismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// Rejected by the existing mask at index `against`.
    Reject { against: usize, reason: RejectReason },
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Check `candidate` against every accepted mask; the first failing pair rejects it.
///
/// Always accepts when `existing` is empty. Non-overlapping pairs always pass.
pub fn evaluate(candidate: &Mask, existing: &[Mask], cfg: &AcceptanceConfig) -> Verdict {
    if existing.is_empty() {
        return Verdict::Accept;
    }

    let candidate_area = candidate.area();
    let candidate_span = candidate.bounds().map_or(0, |b| b.max_span());

    for (idx, prev) in existing.iter().enumerate() {
        let reject = |reason| Verdict::Reject {
            against: idx,
            reason,
        };
        if prev.dimensions() != candidate.dimensions() {
            return reject(RejectReason::DimensionMismatch);
        }

        let overlap = prev.intersection(candidate);
        let overlap_area = overlap.area();
        // A non-empty overlap implies both masks are non-empty.
        let Some(overlap_bounds) = overlap.bounds() else {
            continue;
        };

        let prev_area = prev.area();
        if ratio(overlap_area, prev_area) > cfg.max_overlap_ratio
            || ratio(overlap_area, candidate_area) > cfg.max_overlap_ratio
        {
            return reject(RejectReason::OverlapArea);
        }

        let overlap_span = overlap_bounds.max_span() as usize;
        let prev_span = prev.bounds().map_or(0, |b| b.max_span()) as usize;
        if ratio(overlap_span, prev_span) > cfg.max_span_ratio
            || ratio(overlap_span, candidate_span as usize) > cfg.max_span_ratio
        {
            return reject(RejectReason::OverlapSpan);
        }
    }
    Verdict::Accept
}

pub fn is_acceptable(candidate: &Mask, existing: &[Mask], cfg: &AcceptanceConfig) -> bool {
    evaluate(candidate, existing, cfg).is_accept()
}

/// `num / den`, treating an empty denominator as no overlap at all.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/acceptance.rs"]
mod tests;
