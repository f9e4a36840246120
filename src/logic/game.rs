//! Move application and terminal-state classification.

use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::moves::{Move, SpecialKind};
use crate::logic::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome classification of a position. Always derived from a board's
/// history and piece layout, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    WhiteWon,
    BlackWon,
    Draw,
}

/// Error returned by [`apply_move`] when the supplied move is not among the
/// legal moves of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMove;

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move is not legal in the current position")
    }
}

impl std::error::Error for IllegalMove {}

/// Validates `mv` against the generated move list and applies it.
///
/// The input board is never mutated; the successor position is returned as
/// a fresh board with the move appended to its history.
pub fn apply_move(board: &Board, mv: &Move) -> Result<Board, IllegalMove> {
    if !rules::generate_moves(board).contains(mv) {
        return Err(IllegalMove);
    }
    Ok(apply_move_unchecked(board, mv))
}

/// Applies `mv` without validating it. Callers must pass a move produced by
/// [`rules::generate_moves`] for this exact board.
#[must_use]
pub fn apply_move_unchecked(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();
    let mover = next.current_player();

    // The en passant flag survives exactly one ply: any board move by the
    // opponent clears it. Protocol moves leave the flags untouched.
    if !matches!(mv, Move::Special { .. }) {
        for square in Square::all() {
            if let Some(mut piece) = next.piece_at(square) {
                if piece.color != mover && piece.en_passant_capturable {
                    piece.en_passant_capturable = false;
                    next.set(square, Some(piece));
                }
            }
        }
    }

    match mv {
        Move::Special { .. } => {}

        Move::Castling { owner, side } => {
            let squares = Move::castling_squares(*owner, *side);
            next.relocate(squares.king_from, squares.king_to);
            next.relocate(squares.rook_from, squares.rook_to);
            mark_moved(&mut next, squares.king_to);
            mark_moved(&mut next, squares.rook_to);
        }

        Move::EnPassant { from, to, victim } => {
            next.relocate(*from, *to);
            next.set(*victim, None);
            mark_moved(&mut next, *to);
        }

        Move::Promotion {
            from,
            to,
            promote_to,
        } => {
            next.relocate(*from, *to);
            if let Some(pawn) = next.piece_at(*to) {
                let mut promoted = Piece::new(*promote_to, pawn.color);
                promoted.has_moved = true;
                next.set(*to, Some(promoted));
            }
        }

        Move::Plain { from, to, .. } => {
            next.relocate(*from, *to);
            if let Some(mut piece) = next.piece_at(*to) {
                piece.has_moved = true;
                if piece.kind == PieceKind::Pawn
                    && from.file() == to.file()
                    && from.rank().abs_diff(to.rank()) == 2
                {
                    piece.en_passant_capturable = true;
                }
                next.set(*to, Some(piece));
            }
        }
    }

    next.toggle_player();
    next.push_history(mv.clone());
    next
}

fn mark_moved(board: &mut Board, square: Square) {
    if let Some(mut piece) = board.piece_at(square) {
        piece.has_moved = true;
        board.set(square, Some(piece));
    }
}

/// Classifies the position for the side to move.
#[must_use]
pub fn game_state(board: &Board) -> GameState {
    game_state_for(board, board.current_player())
}

/// Classifies the position, checking `player` for check/stalemate.
#[must_use]
pub fn game_state_for(board: &Board, player: Color) -> GameState {
    let specials = board.history().iter().filter_map(|mv| match mv {
        Move::Special { owner, kind } => Some((*owner, *kind)),
        _ => None,
    });

    let mut offered = false;
    for (owner, kind) in specials {
        match kind {
            SpecialKind::Resign => return winner(owner.opposite()),
            SpecialKind::DrawAccept => return GameState::Draw,
            SpecialKind::DrawOffer => offered = true,
            SpecialKind::DrawDecline => {}
        }
    }
    // An offer without an accept leaves the game running.
    if offered {
        return GameState::InProgress;
    }

    let in_check = rules::is_in_check(board, player);
    let has_moves = rules::generate_moves(board)
        .iter()
        .any(|mv| !matches!(mv, Move::Special { .. }));

    if !has_moves {
        if in_check {
            return winner(board.current_player().opposite());
        }
        return GameState::Draw; // stalemate
    }

    insufficient_material(board).unwrap_or(GameState::InProgress)
}

const fn winner(color: Color) -> GameState {
    match color {
        Color::White => GameState::WhiteWon,
        Color::Black => GameState::BlackWon,
    }
}

/// The simplified insufficient-material draws: bare kings, a lone minor
/// piece, or bishops of the same square colour on either side.
fn insufficient_material(board: &Board) -> Option<GameState> {
    let occupied: Vec<(Square, Piece)> = board.pieces().collect();

    match occupied.len() {
        2 => Some(GameState::Draw),
        3 if occupied
            .iter()
            .any(|(_, p)| matches!(p.kind, PieceKind::Bishop | PieceKind::Knight)) =>
        {
            Some(GameState::Draw)
        }
        4 => {
            let black_pieces = occupied
                .iter()
                .filter(|(_, p)| p.color == Color::Black)
                .count();
            let bishops: Vec<&(Square, Piece)> = occupied
                .iter()
                .filter(|(_, p)| p.kind == PieceKind::Bishop)
                .collect();
            if black_pieces == 2
                && bishops.len() == 2
                && bishops[0].0.is_dark() == bishops[1].0.is_dark()
            {
                Some(GameState::Draw)
            } else {
                None
            }
        }
        _ => None,
    }
}
