use rand::{SeedableRng as _, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    compose::assembler::{CompositeGenerator, CompositeSample},
    foundation::{
        error::{SynthError, SynthResult},
        math::sample_seed,
    },
};

/// Options for [`generate_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Base seed. Sample `i` is drawn from a generator seeded with `sample_seed(seed, i)`.
    pub seed: u64,
}

/// Generate sample `index` of the stream rooted at `seed`.
///
/// Each index owns an independent random generator, so samples can be produced in any order or
/// on any thread and still come out identical.
pub fn sample_at(
    generator: &CompositeGenerator,
    seed: u64,
    index: u64,
) -> SynthResult<CompositeSample> {
    let mut rng = StdRng::seed_from_u64(sample_seed(seed, index));
    generator.generate(&mut rng)
}

/// Lazily generated sequence of `count` composites.
#[derive(Debug)]
pub struct SampleStream<'a> {
    generator: &'a CompositeGenerator,
    seed: u64,
    count: usize,
    next: usize,
}

impl<'a> SampleStream<'a> {
    pub fn new(generator: &'a CompositeGenerator, seed: u64, count: usize) -> Self {
        Self {
            generator,
            seed,
            count,
            next: 0,
        }
    }

    /// Total number of samples the stream yields.
    pub fn total(&self) -> usize {
        self.count
    }

    /// Index of the sample the next call to `next` yields.
    pub fn position(&self) -> usize {
        self.next
    }
}

impl Iterator for SampleStream<'_> {
    type Item = SynthResult<CompositeSample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let idx = self.next;
        self.next += 1;
        Some(sample_at(self.generator, self.seed, idx as u64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SampleStream<'_> {}

/// Generate `count` samples in parallel. Output order matches [`SampleStream`] for the same
/// seed and count; the first failing sample aborts the batch.
#[tracing::instrument(skip(generator, opts), fields(threads = ?opts.threads, seed = opts.seed))]
pub fn generate_batch(
    generator: &CompositeGenerator,
    count: usize,
    opts: &BatchOpts,
) -> SynthResult<Vec<CompositeSample>> {
    let pool = build_thread_pool(opts.threads)?;
    let out = pool.install(|| {
        (0..count)
            .into_par_iter()
            .map(|idx| sample_at(generator, opts.seed, idx as u64))
            .collect::<SynthResult<Vec<_>>>()
    })?;

    let attempts: usize = out.iter().map(|s| s.attempts).sum();
    let boxy = out.iter().filter(|s| s.boxy).count();
    tracing::info!(samples = out.len(), attempts, boxy, "batch generated");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> SynthResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SynthError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SynthError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/batch.rs"]
mod tests;
