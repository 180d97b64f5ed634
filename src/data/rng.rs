//! Seeded Gaussian noise streams.
//!
//! Every draw advances the stream, so the values a caller sees depend on the
//! order in which draws are requested. The stream is always an explicit value
//! passed by `&mut`; there is no process-wide generator.
//!
//! Two streams are provided:
//!
//! - [`RngKind::Legacy`]: a 32-bit Mersenne Twister (MT19937) seeded with the
//!   classic `init_genrand` routine, paired with the polar Box–Muller method
//!   that caches the second variate of every accepted pair. Seeded with 42 this
//!   yields `0.4967141530112327, -0.13826430117118466, ...`.
//! - [`RngKind::Std`]: `StdRng` + `rand_distr::Normal` (ziggurat). Reproducible
//!   for a given seed and `rand` version, but numerically unrelated to the
//!   legacy stream.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::RngKind;
use crate::error::AppError;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister.
#[derive(Clone)]
pub struct Mt19937 {
    state: Box<[u32; N]>,
    idx: usize,
}

impl Mt19937 {
    /// Seed with `init_genrand(seed)`.
    pub fn new(seed: u32) -> Self {
        let mut state = Box::new([0u32; N]);
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, idx: N }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.idx = 0;
    }

    /// Uniform in `[0, 1)` with 53 bits of precision (two 32-bit outputs).
    pub fn next_f64(&mut self) -> f64 {
        let a = (self.next_u32() >> 5) as f64;
        let b = (self.next_u32() >> 6) as f64;
        (a * 67_108_864.0 + b) / 9_007_199_254_740_992.0
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("idx", &self.idx).finish_non_exhaustive()
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        if self.idx >= N {
            self.twist();
        }
        let mut y = self.state[self.idx];
        self.idx += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    // The default expands the seed through PCG; keep `init_genrand` semantics.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// A stream of Gaussian draws.
///
/// Implementors provide standard-normal variates; `normal` scales them.
pub trait NoiseSource {
    /// One draw from N(0, 1).
    fn standard_normal(&mut self) -> Result<f64, AppError>;

    /// `count` independent draws from N(mean, std²), in stream order.
    fn normal(&mut self, mean: f64, std: f64, count: usize) -> Result<Vec<f64>, AppError> {
        validate_params(mean, std)?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(mean + std * self.standard_normal()?);
        }
        Ok(out)
    }
}

fn validate_params(mean: f64, std: f64) -> Result<(), AppError> {
    if !mean.is_finite() {
        return Err(AppError::config(format!("Noise mean must be finite, got {mean}.")));
    }
    if !(std.is_finite() && std >= 0.0) {
        return Err(AppError::config(format!(
            "Noise standard deviation must be finite and >= 0, got {std}."
        )));
    }
    Ok(())
}

/// MT19937 + polar Gaussian with a cached spare variate.
#[derive(Debug, Clone)]
pub struct LegacyNormal {
    rng: Mt19937,
    spare: Option<f64>,
}

impl LegacyNormal {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Mt19937::new(seed),
            spare: None,
        }
    }
}

impl NoiseSource for LegacyNormal {
    fn standard_normal(&mut self) -> Result<f64, AppError> {
        if let Some(z) = self.spare.take() {
            return Ok(z);
        }

        let (x1, x2, r2) = loop {
            let x1 = 2.0 * self.rng.next_f64() - 1.0;
            let x2 = 2.0 * self.rng.next_f64() - 1.0;
            let r2 = x1 * x1 + x2 * x2;
            if r2 < 1.0 && r2 != 0.0 {
                break (x1, x2, r2);
            }
        };

        let f = (-2.0 * r2.ln() / r2).sqrt();
        self.spare = Some(f * x1);
        Ok(f * x2)
    }
}

/// `StdRng` driving `rand_distr::Normal`.
#[derive(Debug, Clone)]
pub struct StdNormal {
    rng: StdRng,
}

impl StdNormal {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for StdNormal {
    fn standard_normal(&mut self) -> Result<f64, AppError> {
        Ok(self.rng.sample(rand_distr::StandardNormal))
    }

    fn normal(&mut self, mean: f64, std: f64, count: usize) -> Result<Vec<f64>, AppError> {
        validate_params(mean, std)?;
        let normal = Normal::new(mean, std)
            .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
        Ok((0..count).map(|_| normal.sample(&mut self.rng)).collect())
    }
}

/// Replays a fixed sequence of standard-normal draws.
///
/// Useful for injecting known noise, or for handing pre-materialized draws to
/// code that must not touch the live stream.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<f64>,
    pos: usize,
}

impl ReplaySource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, pos: 0 }
    }

    /// Pull `count` standard-normal draws from `source` and freeze them.
    pub fn record(source: &mut dyn NoiseSource, count: usize) -> Result<Self, AppError> {
        Ok(Self::new(source.normal(0.0, 1.0, count)?))
    }

    pub fn remaining(&self) -> usize {
        self.draws.len() - self.pos
    }
}

impl NoiseSource for ReplaySource {
    fn standard_normal(&mut self) -> Result<f64, AppError> {
        let z = self.draws.get(self.pos).copied().ok_or_else(|| {
            AppError::new(4, format!("Replay stream exhausted after {} draws.", self.draws.len()))
        })?;
        self.pos += 1;
        Ok(z)
    }
}

/// The stream selected by configuration.
#[derive(Debug, Clone)]
pub enum RandomSource {
    Legacy(LegacyNormal),
    Std(StdNormal),
}

impl RandomSource {
    /// Start a fresh stream of the given kind.
    pub fn seed(kind: RngKind, seed: u32) -> Self {
        match kind {
            RngKind::Legacy => RandomSource::Legacy(LegacyNormal::new(seed)),
            RngKind::Std => RandomSource::Std(StdNormal::new(u64::from(seed))),
        }
    }

    pub fn kind(&self) -> RngKind {
        match self {
            RandomSource::Legacy(_) => RngKind::Legacy,
            RandomSource::Std(_) => RngKind::Std,
        }
    }
}

impl NoiseSource for RandomSource {
    fn standard_normal(&mut self) -> Result<f64, AppError> {
        match self {
            RandomSource::Legacy(s) => s.standard_normal(),
            RandomSource::Std(s) => s.standard_normal(),
        }
    }

    fn normal(&mut self, mean: f64, std: f64, count: usize) -> Result<Vec<f64>, AppError> {
        match self {
            RandomSource::Legacy(s) => s.normal(mean, std, count),
            RandomSource::Std(s) => s.normal(mean, std, count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mt19937_matches_known_outputs() {
        // Canonical first output of init_genrand(5489).
        let mut rng = Mt19937::new(5489);
        assert_eq!(rng.next_u32(), 3_499_211_612);

        let mut rng = Mt19937::new(42);
        assert_eq!(rng.next_f64(), 0.3745401188473625);
    }

    #[test]
    fn legacy_normal_seed_42_sequence() {
        let mut src = RandomSource::seed(RngKind::Legacy, 42);
        let draws = src.normal(0.0, 1.0, 5).unwrap();
        let expected = [
            0.4967141530112327,
            -0.13826430117118466,
            0.6476885381006925,
            1.5230298564080254,
            -0.23415337472333597,
        ];
        for (got, want) in draws.iter().zip(expected) {
            assert!((got - want).abs() < 1e-15, "got {got}, want {want}");
        }
    }

    #[test]
    fn same_seed_reproduces_bit_identical_draws() {
        for kind in [RngKind::Legacy, RngKind::Std] {
            let a = RandomSource::seed(kind, 7).normal(0.0, 0.5, 33).unwrap();
            let b = RandomSource::seed(kind, 7).normal(0.0, 0.5, 33).unwrap();
            assert_eq!(a, b, "{kind:?} stream not reproducible");
        }
    }

    #[test]
    fn draws_continue_across_calls() {
        let mut split = RandomSource::seed(RngKind::Legacy, 42);
        let mut first = split.normal(0.0, 1.0, 3).unwrap();
        first.extend(split.normal(0.0, 1.0, 4).unwrap());

        let whole = RandomSource::seed(RngKind::Legacy, 42).normal(0.0, 1.0, 7).unwrap();
        assert_eq!(first, whole);
    }

    #[test]
    fn zero_std_yields_mean_exactly() {
        let mut src = RandomSource::seed(RngKind::Std, 1);
        let draws = src.normal(3.0, 0.0, 10).unwrap();
        assert!(draws.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn negative_std_is_rejected() {
        let mut src = RandomSource::seed(RngKind::Legacy, 1);
        let err = src.normal(0.0, -1.0, 3).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn replay_returns_recorded_draws_then_fails() {
        let mut live = RandomSource::seed(RngKind::Legacy, 42);
        let mut replay = ReplaySource::record(&mut live, 2).unwrap();
        assert_eq!(replay.remaining(), 2);

        let z = replay.normal(1.0, 2.0, 2).unwrap();
        assert!((z[0] - (1.0 + 2.0 * 0.4967141530112327)).abs() < 1e-15);
        assert!(replay.standard_normal().is_err());
    }
}
