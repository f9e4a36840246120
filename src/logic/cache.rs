//! Memoization for move generation and threat maps.
//!
//! Positions recur constantly during search (transpositions, repeated
//! legality probes on the same node), so a cache keyed by the full position
//! pays for itself quickly. Keys are complete `(Board, Color)` snapshots:
//! hashing narrows the bucket and full equality settles it, so two
//! positions that merely hash alike can never share an entry.

use crate::logic::board::{Board, Color, Square};
use crate::logic::moves::Move;
use crate::logic::rules;
use std::collections::{HashMap, HashSet};

/// Caches the results of [`rules::generate_moves`] and
/// [`rules::threatened_squares`] per position.
///
/// The cache never invalidates: boards are immutable values, so an entry
/// can only ever be rediscovered, not go stale. Drop the cache to bound
/// memory between games.
#[derive(Debug, Default)]
pub struct MoveCache {
    moves: HashMap<(Board, Color), Vec<Move>>,
    threats: HashMap<(Board, Color), HashSet<Square>>,
}

impl MoveCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached equivalent of [`rules::generate_moves_for`].
    pub fn generate_moves(&mut self, board: &Board, player: Color) -> &[Move] {
        let key = (board.clone(), player);
        self.moves
            .entry(key)
            .or_insert_with(|| {
                log::trace!("move cache miss for {player}");
                rules::generate_moves_for(board, player)
            })
            .as_slice()
    }

    /// Cached equivalent of [`rules::threatened_squares`].
    pub fn threatened_squares(&mut self, board: &Board, defender: Color) -> &HashSet<Square> {
        let key = (board.clone(), defender);
        &*self.threats.entry(key).or_insert_with(|| {
            log::trace!("threat cache miss for {defender}");
            rules::threatened_squares(board, defender)
        })
    }

    /// Number of distinct positions with cached move lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.threats.is_empty()
    }
}
