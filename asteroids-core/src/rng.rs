/// xorshift32 stream. Every random draw in the simulation goes through this so
/// a seed plus an input tape reproduces a session exactly.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly.
        (self.next() >> 8) as f32 / (1u32 << 24) as f32
    }

    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Integer in `[min, max]`, both ends inclusive.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(max >= min);
        let span = (max - min) as u32 + 1;
        min + (self.next() % span) as i32
    }

    /// Derives an independent stream, advancing this one by a single draw.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next() ^ 0x9E37_79B9)
    }
}
