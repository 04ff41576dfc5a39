//! Emission rate oracle.

use crate::math::SimRng;
use crate::span::Span;

/// How many particles to emit, and how often.
///
/// Every `interval` seconds (sampled afresh after each firing) the rate yields
/// `count` particles. A count span whose upper bound is exactly 1 is read as
/// a probability: it yields 1 when the sampled count exceeds 0.5, otherwise 0.
///
/// # Example
///
/// ```ignore
/// let steady = Rate::new(Span::new(10.0, 20.0), Span::fixed(0.1)); // 10..20 every 0.1s
/// let sparse = Rate::new(Span::new(0.0, 1.0), Span::fixed(0.05));  // coin flip every 0.05s
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Rate {
    pub count: Span,
    pub interval: Span,
    elapsed: f32,
    next: f32,
}

impl Rate {
    pub fn new(count: impl Into<Span>, interval: impl Into<Span>) -> Self {
        let interval = interval.into();
        let next = interval.a();
        Self {
            count: count.into(),
            interval,
            elapsed: 0.0,
            next,
        }
    }

    /// Restart the clock with a freshly sampled interval.
    pub fn init(&mut self, rng: &mut SimRng) {
        self.elapsed = 0.0;
        self.next = self.interval.value(rng);
    }

    /// Advance by `time` and return how many particles to spawn now.
    pub fn value(&mut self, time: f32, rng: &mut SimRng) -> u32 {
        self.elapsed += time;
        if self.elapsed < self.next {
            return 0;
        }

        self.init(rng);
        if self.count.b() == 1.0 {
            u32::from(self.count.value(rng) > 0.5)
        } else {
            self.count.int_value(rng).max(0.0) as u32
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}
