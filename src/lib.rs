//! strokesynth generates synthetic training data for CJK stroke segmentation.
//!
//! Single-stroke outlines are randomly deformed and composed into "fake characters". For each
//! composite the crate produces:
//!
//! - the rendered ink image
//! - one binary mask per stroke
//! - a 3-class label mask (background, single stroke, overlap)
//!
//! Entry points are [`CompositeGenerator`] for one sample at a time, and [`SampleStream`] /
//! [`generate_batch`] for reproducible sequences.
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod export;
pub mod foundation;
pub mod mask;
pub mod render;
pub mod sampling;
pub mod strokes;

pub use crate::compose::acceptance::{
    AcceptanceConfig, RejectReason, Verdict, evaluate, is_acceptable,
};
pub use crate::compose::assembler::{CompositeGenerator, CompositeSample, StrokeSet};
pub use crate::compose::batch::{BatchOpts, SampleStream, generate_batch, sample_at};
pub use crate::compose::boxy::{BoxyConfig, compose_boxy};
pub use crate::compose::label::LabelMask;
pub use crate::config::settings::{StrokeCountRange, SynthConfig};
pub use crate::export::coco::{CocoBuilder, CocoDataset};
pub use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2, ViewBox};
pub use crate::foundation::error::{SynthError, SynthResult};
pub use crate::foundation::math::sample_seed;
pub use crate::mask::geometry::{Mask, MaskBounds};
pub use crate::render::document::{TransformedStroke, render_svg};
pub use crate::render::raster::{RasterImage, Rasterizer, ResvgRasterizer};
pub use crate::sampling::affine::{AffineParams, AffineSampler, SamplerConfig};
pub use crate::strokes::library::StrokeLibrary;
pub use crate::strokes::path::{StrokePath, StrokeSource};
