//! Chess implementations of the search capability traits.

use crate::engine::{Applier, Generator};
use crate::logic::board::Board;
use crate::logic::game::apply_move_unchecked;
use crate::logic::moves::Move;
use crate::logic::rules::generate_moves;

/// [`Generator`] backed by the full chess rules, protocol moves included.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl Generator<Board> for LegalMoveGenerator {
    type Move = Move;

    fn generate(&self, board: &Board) -> Vec<Move> {
        generate_moves(board)
    }
}

/// [`Applier`] for chess. Skips revalidation, so it must only see moves
/// produced by [`LegalMoveGenerator`] for the same board.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveApplier;

impl Applier<Board> for MoveApplier {
    type Move = Move;

    fn apply(&self, board: &Board, mv: &Move) -> Board {
        apply_move_unchecked(board, mv)
    }
}
