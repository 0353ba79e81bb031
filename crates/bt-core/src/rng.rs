//! Deterministic, seedable RNG for `Random` composite node selection.
//!
//! # Determinism strategy
//!
//! A tree's `TreeRng` is seeded once, at build time, from a caller-supplied
//! `u64`. Every `Random` node in the tree draws from this single stream, so
//! the sequence of choices a tree makes is entirely determined by the seed
//! and the sequence of ticks — re-running the same tree from the same seed
//! with the same priority inputs reproduces the same leaf selections (§8
//! round-trip law, §9 "Random node determinism").
//!
//! `TreeRng` is `Send` but intentionally not `Sync` — behavior trees are
//! ticked cooperatively from a single caller thread (§5), so there is never
//! a reason to share one across threads.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable RNG wrapper used by `Random` composite nodes.
pub struct TreeRng(SmallRng);

impl TreeRng {
    /// Seed deterministically from a caller-supplied value.
    pub fn new(seed: u64) -> Self {
        TreeRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Sample a uniform `f32` in `[0.0, 1.0)` — used for weighted selection.
    #[inline]
    pub fn gen_unit(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }

    /// Choose an index uniformly among `0..len`. Returns `None` if `len == 0`.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.0.gen_range(0..len))
        }
    }
}
