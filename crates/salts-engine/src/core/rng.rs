//! Seedable xorshift64 generator for spawn placement.
//! Deterministic per seed so levels replay identically in tests.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Value in [low, high]. Collapses to `low` when the range is empty.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if !(high > low) {
            return low;
        }
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        (low + unit * (high - low)).min(high)
    }
}
