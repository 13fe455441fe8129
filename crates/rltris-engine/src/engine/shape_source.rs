use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::core::ShapeKind;

/// Supplies the shape of each newly spawned piece.
pub trait ShapeSource: fmt::Debug {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Picks each shape uniformly at random, independent of previous picks.
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: Pcg64Mcg,
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomShapes {
    /// Creates a new [`RandomShapes`].
    ///
    /// The random seed is initialized from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg64Mcg::from_os_rng(),
        }
    }

    /// Creates a reproducible source from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Cycles through a fixed list of shapes.
///
/// Useful for tests and for replaying a known piece order.
#[derive(Debug, Clone)]
pub struct ShapeSequence {
    shapes: Vec<ShapeKind>,
    next: usize,
}

impl ShapeSequence {
    /// Creates a sequence that repeats `shapes` forever.
    ///
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    #[must_use]
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        assert!(!shapes.is_empty(), "shape sequence must not be empty");
        Self { shapes, next: 0 }
    }
}

impl ShapeSource for ShapeSequence {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_cycles() {
        let mut source = ShapeSequence::new(vec![ShapeKind::I, ShapeKind::O]);
        let drawn: Vec<_> = (0..5).map(|_| source.next_shape()).collect();
        assert_eq!(
            drawn,
            [
                ShapeKind::I,
                ShapeKind::O,
                ShapeKind::I,
                ShapeKind::O,
                ShapeKind::I
            ]
        );
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = RandomShapes::from_seed(42);
        let mut b = RandomShapes::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }
}
