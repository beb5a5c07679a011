// File: crates/converge-core/src/sequence.rs
// Summary: Converging-sequence generator and the two point presentations built from it.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SequenceSpec;

/// Ordered sequence values; `values()[k]` is term `n = k + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
}

impl Sequence {
    pub fn values(&self) -> &[f64] { &self.values }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Constant-y presentation: each value on the number line at y = 0.
    pub fn number_line_points(&self) -> Vec<(f64, f64)> {
        self.values.iter().map(|&v| (v, 0.0)).collect()
    }

    /// Value/index presentation: x = value, y = 1-based term index.
    pub fn diagram_points(&self) -> Vec<(f64, f64)> {
        self.values.iter().enumerate().map(|(k, &v)| (v, (k + 1) as f64)).collect()
    }

    /// Min/max of the values, `None` when empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut it = self.values.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Oscillation envelope at 1-based index `n`: the largest possible distance from target.
#[inline]
pub fn envelope(spec: &SequenceSpec, n: usize) -> f64 {
    spec.oscillation_range / (n as f64).powf(spec.convergence_speed)
}

/// Generate a sequence from the thread RNG. Non-deterministic across calls.
pub fn generate(spec: &SequenceSpec) -> Sequence {
    generate_with(spec, &mut rand::rng())
}

/// Generate a reproducible sequence from a seed.
pub fn generate_seeded(spec: &SequenceSpec, seed: u64) -> Sequence {
    generate_with(spec, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Generate with a caller-supplied RNG. Inputs are not validated:
/// `sequence_length == 0` yields an empty sequence.
pub fn generate_with<R: Rng>(spec: &SequenceSpec, rng: &mut R) -> Sequence {
    let values = (1..=spec.sequence_length)
        .map(|n| {
            let r: f64 = rng.random_range(-1.0..1.0);
            spec.target + envelope(spec, n) * r
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        len = values.len(),
        target = spec.target,
        range = spec.oscillation_range,
        speed = spec.convergence_speed,
        "generated sequence"
    );
    Sequence { values }
}
