use std::sync::Arc;

use super::*;
use crate::{config::settings::SynthConfig, strokes::library::StrokeLibrary};

fn generator() -> CompositeGenerator {
    let cfg = SynthConfig {
        size_px: 96,
        boxy_probability: 0.0,
        ..SynthConfig::default()
    };
    CompositeGenerator::new(Arc::new(StrokeLibrary::builtin().unwrap()), cfg).unwrap()
}

#[test]
fn parallel_batch_matches_sequential_stream() {
    let generator = generator();
    let opts = BatchOpts {
        threads: Some(3),
        seed: 1234,
    };
    let batch = generate_batch(&generator, 6, &opts).unwrap();
    let stream = SampleStream::new(&generator, 1234, 6)
        .collect::<SynthResult<Vec<_>>>()
        .unwrap();

    assert_eq!(batch.len(), 6);
    for (a, b) in batch.iter().zip(&stream) {
        assert_eq!(a.label, b.label);
        assert_eq!(a.image, b.image);
    }
}

#[test]
fn stream_is_indexable() {
    let generator = generator();
    let mut stream = SampleStream::new(&generator, 9, 4);
    let _ = stream.next().unwrap().unwrap();
    assert_eq!(stream.position(), 1);
    let second = stream.next().unwrap().unwrap();
    assert_eq!(second.label, sample_at(&generator, 9, 1).unwrap().label);
}

#[test]
fn stream_yields_configured_total() {
    let generator = generator();
    let mut stream = SampleStream::new(&generator, 5, 3);
    assert_eq!(stream.total(), 3);
    assert_eq!(stream.len(), 3);
    assert!(stream.next().unwrap().is_ok());
    assert_eq!(stream.size_hint(), (2, Some(2)));
    assert_eq!(stream.count(), 2);

    assert_eq!(SampleStream::new(&generator, 5, 3).count(), 3);
    assert!(SampleStream::new(&generator, 5, 0).next().is_none());
}

#[test]
fn different_seeds_differ() {
    let generator = generator();
    let a = sample_at(&generator, 1, 0).unwrap();
    let b = sample_at(&generator, 2, 0).unwrap();
    assert_ne!(a.label, b.label);
}

#[test]
fn empty_batch_is_ok() {
    let out = generate_batch(&generator(), 0, &BatchOpts::default()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn zero_threads_is_rejected() {
    let opts = BatchOpts {
        threads: Some(0),
        seed: 0,
    };
    let err = generate_batch(&generator(), 1, &opts).unwrap_err();
    assert!(matches!(err, SynthError::Validation(_)));
}
