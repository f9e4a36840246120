//! One-ply lookahead that minimizes the evaluator's score.

use crate::engine::{Applier, Evaluator, Generator, Strategy};

/// Applies every move and keeps the one whose successor scores LOWEST
/// under the evaluator.
///
/// The minimizing convention is deliberate: pair this strategy with an
/// evaluator built from the opponent's perspective and it plays to hurt
/// them as much as possible in one move. Pairing it with the mover's own
/// perspective instead produces a self-sabotaging player, which is handy
/// as a weak baseline. Ties keep the first move encountered.
#[derive(Debug)]
pub struct GreedyStrategy<E, G, A> {
    evaluator: E,
    generator: G,
    applier: A,
}

impl<E, G, A> GreedyStrategy<E, G, A> {
    pub fn new(evaluator: E, generator: G, applier: A) -> Self {
        Self {
            evaluator,
            generator,
            applier,
        }
    }
}

impl<S, E, G, A> Strategy<S> for GreedyStrategy<E, G, A>
where
    E: Evaluator<S>,
    G: Generator<S>,
    A: Applier<S, Move = G::Move>,
{
    type Move = G::Move;

    fn select(&mut self, state: &S) -> Option<Self::Move> {
        let mut best: Option<(Self::Move, i32)> = None;
        for mv in self.generator.generate(state) {
            let score = self.evaluator.evaluate(&self.applier.apply(state, &mv));
            match &best {
                Some((_, current)) if score >= *current => {}
                _ => best = Some((mv, score)),
            }
        }
        best.map(|(mv, _)| mv)
    }
}
