//! Injectable random source for level layout
//!
//! Production uses a PCG generator; tests feed fixed sequences.

use rand::Rng;
use rand_pcg::Pcg32;

/// Source of uniform values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[lo, hi)` (returns `lo` when the range is empty)
    fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_unit() * (hi - lo)
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Cycles through a fixed list of values
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Values are clamped into `[0, 1)`; an empty list yields zeros
    pub fn new(values: Vec<f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}
