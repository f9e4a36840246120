//! Depth-limited minimax with alpha-beta pruning.

use crate::engine::config::EngineConfig;
use crate::engine::{Applier, Evaluator, Generator, InvalidConfiguration, Strategy};

/// Fixed-depth alpha-beta search.
///
/// The root always maximizes the evaluator's score; `maximize_root` in
/// [`AlphaBeta::select_from`] only controls whether the ply below the root
/// minimizes (the usual adversarial setup) or keeps maximizing. Leaves are
/// scored by the evaluator directly, both at the depth limit and when a
/// node has no moves. Ties at the root keep the first move encountered.
#[derive(Debug)]
pub struct AlphaBeta<E, G, A> {
    evaluator: E,
    generator: G,
    applier: A,
    max_depth: usize,
}

impl<E, G, A> AlphaBeta<E, G, A> {
    pub fn new(evaluator: E, generator: G, applier: A) -> Self {
        Self {
            evaluator,
            generator,
            applier,
            max_depth: EngineConfig::default().max_depth,
        }
    }

    /// Builds a search with the depth taken from `config`. Fails on a
    /// config that does not pass validation.
    pub fn from_config(
        evaluator: E,
        generator: G,
        applier: A,
        config: &EngineConfig,
    ) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        let mut search = Self::new(evaluator, generator, applier);
        search.max_depth = config.max_depth;
        Ok(search)
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, depth: usize) -> Result<(), InvalidConfiguration> {
        if depth < 1 {
            return Err(InvalidConfiguration);
        }
        self.max_depth = depth;
        Ok(())
    }
}

impl<E, G, A> AlphaBeta<E, G, A> {
    /// Runs the search from `state`. With `maximize_root` the ply below the
    /// root minimizes; without it the whole tree maximizes, which scores
    /// the opponent as a cooperator rather than an adversary.
    pub fn select_from<S>(&self, state: &S, maximize_root: bool) -> Option<G::Move>
    where
        E: Evaluator<S>,
        G: Generator<S>,
        A: Applier<S, Move = G::Move>,
    {
        let mut best: Option<(G::Move, i32)> = None;
        for mv in self.generator.generate(state) {
            let child = self.applier.apply(state, &mv);
            let score = self.score(&child, 1, i32::MIN, i32::MAX, !maximize_root);
            match &best {
                Some((_, current)) if score <= *current => {}
                _ => best = Some((mv, score)),
            }
        }
        if let Some((_, score)) = &best {
            log::debug!("search depth {} root score {score}", self.max_depth);
        }
        best.map(|(mv, _)| mv)
    }

    fn score<S>(&self, state: &S, depth: usize, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32
    where
        E: Evaluator<S>,
        G: Generator<S>,
        A: Applier<S, Move = G::Move>,
    {
        if depth >= self.max_depth {
            return self.evaluator.evaluate(state);
        }
        let moves = self.generator.generate(state);
        if moves.is_empty() {
            return self.evaluator.evaluate(state);
        }

        if maximizing {
            let mut value = i32::MIN;
            for mv in moves {
                let child = self.applier.apply(state, &mv);
                value = value.max(self.score(&child, depth + 1, alpha, beta, false));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for mv in moves {
                let child = self.applier.apply(state, &mv);
                value = value.min(self.score(&child, depth + 1, alpha, beta, true));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}

impl<S, E, G, A> Strategy<S> for AlphaBeta<E, G, A>
where
    E: Evaluator<S>,
    G: Generator<S>,
    A: Applier<S, Move = G::Move>,
{
    type Move = G::Move;

    fn select(&mut self, state: &S) -> Option<Self::Move> {
        self.select_from(state, true)
    }
}
