/// Seeded 32-bit PRNG producing a reproducible stream of floats in [0, 1).
///
/// A single word of state advanced by a fixed odd increment, then mixed with
/// two multiply-xorshift rounds. All arithmetic wraps at 32 bits, so the same
/// seed yields the same stream on every platform regardless of native word
/// size. The derived-dataset pipeline depends on that: draw order is part of
/// the data contract, not an implementation detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next draw in [0, 1). Each call consumes exactly one state step.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}
