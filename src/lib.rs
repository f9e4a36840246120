//! A chess rules engine with a pluggable adversarial search layer.
//!
//! The [`logic`] module owns the game itself: an immutable [`Board`] value,
//! legal move generation including castling, en passant, promotion and the
//! resign/draw protocol, and terminal-state classification. The [`engine`]
//! module builds strategies on top of it through small traits
//! ([`engine::Evaluator`], [`engine::Generator`], [`engine::Applier`]), so
//! the same search code runs against any game that can implement them.
//!
//! ```
//! use chess_core::{apply_move, generate_moves, game_state, Board, GameState};
//!
//! let board = Board::initial();
//! let moves = generate_moves(&board);
//! let board = apply_move(&board, &moves[1]).unwrap();
//! assert_eq!(game_state(&board), GameState::InProgress);
//! ```

pub mod engine;
pub mod logic;

pub use logic::board::{Board, Color, OutOfRange, Piece, PieceKind, Square};
pub use logic::cache::MoveCache;
pub use logic::game::{
    apply_move, apply_move_unchecked, game_state, game_state_for, GameState, IllegalMove,
};
pub use logic::moves::{CastlingSide, Move, SpecialKind};
pub use logic::rules::{generate_moves, generate_moves_for, is_in_check, threatened_squares};
