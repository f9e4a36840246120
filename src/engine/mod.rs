//! Adversarial search over an abstract game.
//!
//! The search strategies here never touch chess directly. They see a game
//! only through three capability traits: a [`Generator`] that lists the
//! moves of a state, an [`Applier`] that produces the successor state of a
//! move, and an [`Evaluator`] that scores a state from a fixed player's
//! point of view. The [`adapters`] module wires the chess core into these
//! traits; any other game can do the same.

pub mod adapters;
pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod greedy;
pub mod random;

use std::fmt;

pub use adapters::{LegalMoveGenerator, MoveApplier};
pub use alpha_beta::AlphaBeta;
pub use config::EngineConfig;
pub use eval::MaterialEvaluator;
pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;

/// Scores a state from the perspective the evaluator was built with.
/// Higher is better for that perspective, regardless of whose turn it is.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> i32;
}

/// Lists the moves available in a state. An empty list means the state is
/// terminal as far as the search is concerned.
pub trait Generator<S> {
    type Move;

    fn generate(&self, state: &S) -> Vec<Self::Move>;
}

/// Produces the successor of a state under a move. Implementations may
/// assume the move came from the paired [`Generator`] for this exact state.
pub trait Applier<S> {
    type Move;

    fn apply(&self, state: &S, mv: &Self::Move) -> S;
}

/// A complete move-selection policy.
pub trait Strategy<S> {
    type Move;

    /// Picks a move for the state, or `None` when no move is available.
    fn select(&mut self, state: &S) -> Option<Self::Move>;
}

/// Error for engine settings that would make a strategy unusable, such as
/// a search depth below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidConfiguration;

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine configuration is invalid")
    }
}

impl std::error::Error for InvalidConfiguration {}
