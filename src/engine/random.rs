//! Uniform random move selection.

use crate::engine::{Generator, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks uniformly among the generated moves. Useful as a baseline
/// opponent and for exercising the rules from arbitrary positions.
#[derive(Debug)]
pub struct RandomStrategy<G, R> {
    generator: G,
    rng: R,
}

impl<G, R> RandomStrategy<G, R> {
    pub fn new(generator: G, rng: R) -> Self {
        Self { generator, rng }
    }
}

impl<G> RandomStrategy<G, StdRng> {
    /// A strategy seeded from the operating system.
    pub fn from_entropy(generator: G) -> Self {
        Self::new(generator, StdRng::from_entropy())
    }
}

impl<S, G, R> Strategy<S> for RandomStrategy<G, R>
where
    G: Generator<S>,
    R: Rng,
{
    type Move = G::Move;

    fn select(&mut self, state: &S) -> Option<Self::Move> {
        let mut moves = self.generator.generate(state);
        if moves.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..moves.len());
        Some(moves.swap_remove(pick))
    }
}
