//! Material evaluation of chess positions.

use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use crate::logic::game::{self, GameState};
use std::sync::Arc;

/// Score of a position already won for the evaluator's perspective. Kept
/// well above any reachable material total so terminal positions dominate
/// every heuristic score.
pub const MATE_SCORE: i32 = 100_000;

/// Scores a board by summing piece values, positive for the perspective
/// player's material and negative for the opponent's.
///
/// Terminal positions short-circuit the sum: a win for the perspective is
/// [`MATE_SCORE`], a loss is `-MATE_SCORE` and a draw is 0. The perspective
/// is fixed at construction and does not follow the side to move.
#[derive(Debug, Clone)]
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
    perspective: Color,
}

impl MaterialEvaluator {
    #[must_use]
    pub fn new(perspective: Color) -> Self {
        Self::with_config(Arc::new(EngineConfig::default()), perspective)
    }

    #[must_use]
    pub fn with_config(config: Arc<EngineConfig>, perspective: Color) -> Self {
        Self {
            config,
            perspective,
        }
    }

    #[must_use]
    pub const fn perspective(&self) -> Color {
        self.perspective
    }
}

impl Evaluator<Board> for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        match game::game_state(board) {
            GameState::WhiteWon => {
                if self.perspective == Color::White {
                    return MATE_SCORE;
                }
                return -MATE_SCORE;
            }
            GameState::BlackWon => {
                if self.perspective == Color::Black {
                    return MATE_SCORE;
                }
                return -MATE_SCORE;
            }
            GameState::Draw => return 0,
            GameState::InProgress => {}
        }

        board
            .pieces()
            .map(|(_, piece)| {
                let value = self.config.piece_value(piece.kind);
                if piece.color == self.perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, PieceKind, Square};
    use crate::logic::game::apply_move_unchecked;
    use crate::logic::moves::{Move, SpecialKind};

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::initial();
        assert_eq!(MaterialEvaluator::new(Color::White).evaluate(&board), 0);
        assert_eq!(MaterialEvaluator::new(Color::Black).evaluate(&board), 0);
    }

    #[test]
    fn material_sum_is_signed_by_perspective() {
        let mut board = Board::empty();
        let sq = |s: &str| s.parse::<Square>().unwrap();
        board.set(sq("E1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq("E8"), Some(Piece::new(PieceKind::King, Color::Black)));
        board.set(sq("D1"), Some(Piece::new(PieceKind::Queen, Color::White)));
        board.set(sq("A8"), Some(Piece::new(PieceKind::Rook, Color::Black)));

        let white = MaterialEvaluator::new(Color::White).evaluate(&board);
        let black = MaterialEvaluator::new(Color::Black).evaluate(&board);
        assert_eq!(white, 900 - 500);
        assert_eq!(black, -white);
    }

    #[test]
    fn terminal_positions_dominate() {
        let board = Board::initial();
        let resigned =
            apply_move_unchecked(&board, &Move::special(Color::White, SpecialKind::Resign));
        assert_eq!(
            MaterialEvaluator::new(Color::Black).evaluate(&resigned),
            MATE_SCORE
        );
        assert_eq!(
            MaterialEvaluator::new(Color::White).evaluate(&resigned),
            -MATE_SCORE
        );

        let offered =
            apply_move_unchecked(&board, &Move::special(Color::White, SpecialKind::DrawOffer));
        let accepted = apply_move_unchecked(
            &offered,
            &Move::special(Color::Black, SpecialKind::DrawAccept),
        );
        assert_eq!(MaterialEvaluator::new(Color::White).evaluate(&accepted), 0);
    }

    #[test]
    fn configured_values_apply() {
        let config = Arc::new(EngineConfig {
            val_queen: 1_000,
            ..EngineConfig::default()
        });
        let mut board = Board::empty();
        let sq = |s: &str| s.parse::<Square>().unwrap();
        board.set(sq("E1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq("E8"), Some(Piece::new(PieceKind::King, Color::Black)));
        board.set(sq("D1"), Some(Piece::new(PieceKind::Queen, Color::White)));
        board.set(sq("D8"), Some(Piece::new(PieceKind::Rook, Color::Black)));

        let eval = MaterialEvaluator::with_config(config, Color::White);
        assert_eq!(eval.evaluate(&board), 1_000 - 500);
    }
}
