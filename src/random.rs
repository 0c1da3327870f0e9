//! Injectable uniform randomness.
//!
//! Routing draws three kinds of random choices: whether to explore, which
//! seam to follow, and which axis or escape direction to take. All of them go
//! through [`UniformSource`] so tests and replays can script the sequence.

use rand::rngs::{SmallRng, StdRng};
use rand::Rng;

/// A source of uniform random choices.
pub trait UniformSource {
    /// Uniform index in `0..n`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize;

    /// True with probability `p`, clamped to `[0, 1]`.
    fn chance(&mut self, p: f64) -> bool;
}

macro_rules! impl_uniform_source {
    ($($rng:ty),*) => {
        $(
            impl UniformSource for $rng {
                fn below(&mut self, n: usize) -> usize {
                    if n == 0 {
                        return 0;
                    }
                    self.gen_range(0..n)
                }

                fn chance(&mut self, p: f64) -> bool {
                    if p.is_nan() || p <= 0.0 {
                        return false;
                    }
                    self.gen_bool(p.min(1.0))
                }
            }
        )*
    };
}

impl_uniform_source!(SmallRng, StdRng);

/// Replays fixed sequences of choices, cycling when exhausted.
///
/// `below(n)` yields the next scripted index modulo `n`; `chance` yields the
/// next scripted flip. An empty script yields 0 and `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    flips: Vec<bool>,
    next_pick: usize,
    next_flip: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>, flips: Vec<bool>) -> Self {
        ScriptedSource { picks, flips, next_pick: 0, next_flip: 0 }
    }

    /// A source that never explores and always takes index 0.
    pub fn zeros() -> Self {
        ScriptedSource::default()
    }
}

impl UniformSource for ScriptedSource {
    fn below(&mut self, n: usize) -> usize {
        if n == 0 || self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next_pick % self.picks.len()];
        self.next_pick += 1;
        pick % n
    }

    fn chance(&mut self, _p: f64) -> bool {
        if self.flips.is_empty() {
            return false;
        }
        let flip = self.flips[self.next_flip % self.flips.len()];
        self.next_flip += 1;
        flip
    }
}
