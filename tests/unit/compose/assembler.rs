use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{
    compose::{acceptance::is_acceptable, boxy::BoxyConfig},
    config::settings::StrokeCountRange,
    sampling::affine::SamplerConfig,
    strokes::path::{StrokePath, StrokeSource},
};

const SIZE: u32 = 128;

fn small_cfg() -> SynthConfig {
    SynthConfig {
        size_px: SIZE,
        boxy_probability: 0.0,
        ..SynthConfig::default()
    }
}

fn builtin_generator(cfg: SynthConfig) -> CompositeGenerator {
    CompositeGenerator::new(Arc::new(StrokeLibrary::builtin().unwrap()), cfg).unwrap()
}

fn box_library() -> StrokeLibrary {
    let stroke = |label: &str, d: &str| {
        StrokePath::parse(StrokeSource::Custom(label.into()), d).unwrap()
    };
    let corner = stroke("corner", "M100 100h800v800h-60v-740h-740z");
    let vertical = stroke("vertical", "M470 100h60v800h-60z");
    let horizontal = stroke("horizontal", "M100 470h800v60h-800z");
    StrokeLibrary::from_parts(
        vec![corner.clone(), vertical.clone(), horizontal.clone()],
        vec![horizontal],
        vec![vertical],
        vec![corner],
    )
    .unwrap()
}

/// Rasterizer that never produces ink.
struct BlankRasterizer;

impl Rasterizer for BlankRasterizer {
    fn rasterize(&self, _svg: &str, width: u32, height: u32) -> SynthResult<RasterImage> {
        Ok(RasterImage {
            ink: image::GrayImage::new(width, height),
        })
    }
}

#[test]
fn composite_shapes_agree() {
    let generator = builtin_generator(small_cfg());
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sample = generator.generate(&mut rng).unwrap();

        assert_eq!((sample.image.width(), sample.image.height()), (SIZE, SIZE));
        assert_eq!(sample.label.dimensions(), (SIZE, SIZE));
        assert_eq!(sample.strokes.strokes.len(), sample.strokes.masks.len());
        assert!((3..=4).contains(&sample.strokes.len()), "seed {seed}");
        for m in &sample.strokes.masks {
            assert_eq!(m.dimensions(), (SIZE, SIZE));
            assert!(!m.is_empty());
        }
        assert!(!sample.boxy);
        assert!(sample.attempts >= sample.strokes.len());
    }
}

#[test]
fn label_counts_covering_masks() {
    let generator = builtin_generator(small_cfg());
    let mut rng = StdRng::seed_from_u64(7);
    let sample = generator.assemble(3, &mut rng).unwrap();

    for y in 0..SIZE {
        for x in 0..SIZE {
            let covering = sample.strokes.masks.iter().filter(|m| m.get(x, y)).count();
            let v = sample.label.get(x, y);
            assert!(v <= LabelMask::OVERLAP);
            assert_eq!(usize::from(v), covering.min(2), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn accepted_strokes_pass_the_heuristic_in_order() {
    let cfg = small_cfg();
    let generator = builtin_generator(cfg.clone());
    let mut rng = StdRng::seed_from_u64(11);
    let sample = generator.assemble(4, &mut rng).unwrap();

    let masks = &sample.strokes.masks;
    for i in 1..masks.len() {
        assert!(is_acceptable(&masks[i], &masks[..i], &cfg.acceptance));
    }
}

#[test]
fn single_stroke_has_no_overlap_class() {
    let generator = builtin_generator(small_cfg());
    let mut rng = StdRng::seed_from_u64(3);
    let sample = generator.assemble(1, &mut rng).unwrap();

    assert_eq!(sample.strokes.len(), 1);
    assert!(sample.attempts >= 1);
    let counts = sample.label.class_counts();
    assert_eq!(counts[2], 0);
    assert_eq!(counts[1], sample.strokes.masks[0].area());
}

#[test]
fn same_seed_same_composite() {
    let generator = builtin_generator(small_cfg());
    let a = generator
        .generate(&mut StdRng::seed_from_u64(99))
        .unwrap();
    let b = generator
        .generate(&mut StdRng::seed_from_u64(99))
        .unwrap();
    assert_eq!(a.label, b.label);
    assert_eq!(a.image, b.image);
    assert_eq!(a.attempts, b.attempts);
}

#[test]
fn stroke_count_stays_in_range() {
    let cfg = SynthConfig {
        strokes: StrokeCountRange { min: 2, max: 5 },
        ..small_cfg()
    };
    let generator = builtin_generator(cfg);
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        assert!((2..=5).contains(&generator.sample_stroke_count(&mut rng)));
    }
}

#[test]
fn exhausted_attempts_is_an_assembly_error() {
    let cfg = SynthConfig {
        max_attempts: 1,
        ..small_cfg()
    };
    let generator = builtin_generator(cfg);
    let mut rng = StdRng::seed_from_u64(5);
    let err = generator.assemble(2, &mut rng).unwrap_err();
    match err {
        SynthError::Assembly {
            accepted,
            target,
            attempts,
        } => {
            assert!(accepted <= 1);
            assert_eq!(target, 2);
            assert_eq!(attempts, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_masks_are_never_accepted() {
    let cfg = SynthConfig {
        max_attempts: 20,
        ..small_cfg()
    };
    let generator = builtin_generator(cfg).with_rasterizer(Arc::new(BlankRasterizer));
    let mut rng = StdRng::seed_from_u64(1);
    let err = generator.assemble(1, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SynthError::Assembly {
            accepted: 0,
            attempts: 20,
            ..
        }
    ));
}

#[test]
fn boxy_mode_seeds_the_composite() {
    let cfg = SynthConfig {
        size_px: 96,
        boxy_probability: 1.0,
        boxy: BoxyConfig {
            align_sigma: 0.0,
            cross_sigma: 0.0,
        },
        sampler: SamplerConfig {
            scale_mean: 0.5,
            scale_min: 0.3,
            ..SamplerConfig::default()
        },
        ..SynthConfig::default()
    };
    let generator = CompositeGenerator::new(Arc::new(box_library()), cfg).unwrap();
    let mut rng = StdRng::seed_from_u64(21);
    let sample = generator.assemble(3, &mut rng).unwrap();

    assert!(sample.boxy);
    assert_eq!(sample.strokes.len(), 3);
    assert_eq!(sample.attempts, 0);
    assert!(sample.label.class_counts()[2] > 0);
}

#[test]
fn boxy_mode_skipped_below_three_strokes() {
    let cfg = SynthConfig {
        size_px: 64,
        boxy_probability: 1.0,
        ..SynthConfig::default()
    };
    let generator = CompositeGenerator::new(Arc::new(box_library()), cfg).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let sample = generator.assemble(1, &mut rng).unwrap();
    assert!(!sample.boxy);
    assert_eq!(sample.strokes.len(), 1);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SynthConfig {
        size_px: 0,
        ..SynthConfig::default()
    };
    let err = CompositeGenerator::new(Arc::new(StrokeLibrary::builtin().unwrap()), cfg)
        .unwrap_err();
    assert!(matches!(err, SynthError::Validation(_)));
}

#[test]
fn zero_target_is_rejected() {
    let generator = builtin_generator(small_cfg());
    let err = generator
        .assemble(0, &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(err, SynthError::Validation(_)));
}
