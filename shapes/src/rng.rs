use rand::{Rng, SeedableRng};
use rand_xoshiro::SplitMix64;

const INCREMENT: u32 = 0x6D2B_79F5;

/// 32-bit mixing generator with wrapping arithmetic throughout. The same
/// seed yields the same stream on every platform, which is what makes a
/// dataset run replayable from its config alone.
#[derive(Clone, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1).
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

// Concrete draw sources
//
// A run picks one variant up front and keeps it for its whole duration:
// `Seeded` replays bit-exactly, `Ambient` is explicitly non-reproducible.
pub enum UniformSource {
    Seeded(Mulberry32),
    Ambient(SplitMix64),
}

impl UniformSource {
    pub fn seeded(seed: u32) -> Self {
        Self::Seeded(Mulberry32::new(seed))
    }

    /// Non-reproducible variant, seeded from OS entropy.
    pub fn ambient() -> Self {
        Self::Ambient(SplitMix64::from_os_rng())
    }

    pub fn resolve(seed: Option<u32>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::ambient(),
        }
    }

    /// Uniform draw in [0, 1).
    pub fn next(&mut self) -> f64 {
        match self {
            Self::Seeded(g) => g.next(),
            Self::Ambient(r) => r.random::<f64>(),
        }
    }

    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Uniform integer draw, inclusive of both bounds.
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        self.next_float(f64::from(min), f64::from(max) + 1.0).floor() as u32
    }
}
