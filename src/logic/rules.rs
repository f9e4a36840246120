//! Move generation and threat computation.
//!
//! Generation runs in two layers: pseudo-legal moves follow each piece's
//! movement pattern and board occupancy only; `generate_moves` then filters
//! them by simulating each candidate on a cloned board and rejecting any
//! that leave the mover's own king on a threatened square. Castling is
//! validated separately against the pre-move threat picture.

use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::game;
use crate::logic::moves::{CastlingSide, Move, SpecialKind};
use std::collections::HashSet;

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Number of plies after which a draw may be offered.
const DRAW_OFFER_THRESHOLD: usize = 30;

/// All legal moves for the side to move.
#[must_use]
pub fn generate_moves(board: &Board) -> Vec<Move> {
    generate_moves_for(board, board.current_player())
}

/// All legal moves for `player`, protocol moves included.
///
/// The result is an eagerly built list: enumerating it twice for the same
/// board yields the same moves in the same order.
#[must_use]
pub fn generate_moves_for(board: &Board, player: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    // The special-move protocol gates everything else.
    match board.history().last() {
        Some(Move::Special {
            kind: SpecialKind::Resign | SpecialKind::DrawAccept,
            ..
        }) => return moves,
        Some(Move::Special {
            kind: SpecialKind::DrawOffer,
            ..
        }) => {
            moves.push(Move::special(player, SpecialKind::DrawAccept));
            moves.push(Move::special(player, SpecialKind::DrawDecline));
            return moves;
        }
        _ => {}
    }

    moves.push(Move::special(player, SpecialKind::Resign));
    if board.history().len() > DRAW_OFFER_THRESHOLD {
        moves.push(Move::special(player, SpecialKind::DrawOffer));
    }

    for mv in pseudo_legal_moves(board, player) {
        let next = game::apply_move_unchecked(board, &mv);
        if !is_in_check(&next, player) {
            moves.push(mv);
        }
    }

    castling_moves(board, player, &mut moves);

    moves
}

/// The set of squares the opponent of `defender` currently attacks.
///
/// Attack reach is raw: the opponent's pseudo-legal destinations with the
/// threats-only pawn mode and no king-safety filtering. The result depends
/// only on the piece layout and `defender`.
#[must_use]
pub fn threatened_squares(board: &Board, defender: Color) -> HashSet<Square> {
    let attacker = defender.opposite();
    let mut raw = Vec::new();
    for (from, piece) in board.pieces() {
        if piece.color == attacker {
            piece_moves(board, from, piece, true, &mut raw);
        }
    }
    raw.iter()
        .map(|mv| match mv {
            Move::Plain { to, .. }
            | Move::Promotion { to, .. }
            | Move::EnPassant { to, .. } => *to,
            // Castling and protocol moves are never produced per piece.
            Move::Castling { .. } | Move::Special { .. } => unreachable!(),
        })
        .collect()
}

/// Whether `player`'s king currently stands on a threatened square.
#[must_use]
pub fn is_in_check(board: &Board, player: Color) -> bool {
    threatened_squares(board, player).contains(&find_king(board, player))
}

/// Locates `player`'s king. A board without one violates the engine's
/// construction invariants, so this fails loudly instead of guessing.
pub(crate) fn find_king(board: &Board, player: Color) -> Square {
    board
        .pieces()
        .find(|(_, p)| p.kind == PieceKind::King && p.color == player)
        .map(|(sq, _)| sq)
        .unwrap_or_else(|| panic!("malformed board: no {player} king present"))
}

fn pseudo_legal_moves(board: &Board, player: Color) -> Vec<Move> {
    let mut out = Vec::new();
    for (from, piece) in board.pieces() {
        if piece.color == player {
            piece_moves(board, from, piece, false, &mut out);
        }
    }
    out
}

fn piece_moves(board: &Board, from: Square, piece: Piece, threats_only: bool, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::King => step_moves(board, from, piece, &ALL_DIRS, out),
        PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_OFFSETS, out),
        PieceKind::Queen => sliding_moves(board, from, piece, &ALL_DIRS, out),
        PieceKind::Rook => sliding_moves(board, from, piece, &ROOK_DIRS, out),
        PieceKind::Bishop => sliding_moves(board, from, piece, &BISHOP_DIRS, out),
        PieceKind::Pawn => pawn_moves(board, from, piece, threats_only, out),
    }
}

fn plain(board: &Board, from: Square, to: Square, piece: Piece) -> Move {
    Move::Plain {
        from,
        to,
        piece,
        capture: board.piece_at(to).is_some(),
    }
}

/// Single-step movers: king (adjacent squares) and knight (fixed jumps).
fn step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if board.piece_at(to).map_or(true, |p| p.color != piece.color) {
                out.push(plain(board, from, to, piece));
            }
        }
    }
}

/// Sliding movers: walk each direction until a piece or the edge blocks it.
fn sliding_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    dirs: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.piece_at(to) {
                None => {
                    out.push(plain(board, from, to, piece));
                    current = to;
                }
                Some(p) => {
                    if p.color != piece.color {
                        out.push(plain(board, from, to, piece));
                    }
                    break;
                }
            }
        }
    }
}

fn pawn_moves(board: &Board, from: Square, piece: Piece, threats_only: bool, out: &mut Vec<Move>) {
    let (dir, far_rank) = match piece.color {
        Color::White => (1, 8),
        Color::Black => (-1, 1),
    };

    // Forward pushes never threaten a square.
    if !threats_only {
        if let Some(to) = from.offset(0, dir) {
            if board.piece_at(to).is_none() {
                push_pawn_landing(board, from, to, piece, far_rank, out);

                if !piece.has_moved {
                    if let Some(double) = from.offset(0, 2 * dir) {
                        if board.piece_at(double).is_none() {
                            out.push(plain(board, from, double, piece));
                        }
                    }
                }
            }
        }
    }

    for side in [1, -1] {
        // Ordinary diagonal capture, onto an enemy-occupied square.
        if let Some(to) = from.offset(side, dir) {
            if board
                .piece_at(to)
                .is_some_and(|p| p.color != piece.color)
            {
                push_pawn_landing(board, from, to, piece, far_rank, out);
            }

            // En passant: the diagonal square is empty and the pawn on the
            // adjacent file just made its double step.
            if board.piece_at(to).is_none() {
                if let Some(victim) = from.offset(side, 0) {
                    let capturable = board.piece_at(victim).is_some_and(|p| {
                        p.color != piece.color
                            && p.kind == PieceKind::Pawn
                            && p.en_passant_capturable
                    });
                    if capturable {
                        out.push(Move::EnPassant { from, to, victim });
                    }
                }
            }
        }
    }
}

/// A pawn arriving on the far rank promotes; otherwise it is a plain move.
fn push_pawn_landing(
    board: &Board,
    from: Square,
    to: Square,
    piece: Piece,
    far_rank: u8,
    out: &mut Vec<Move>,
) {
    if to.rank() == far_rank {
        for promote_to in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            out.push(Move::Promotion {
                from,
                to,
                promote_to,
            });
        }
    } else {
        out.push(plain(board, from, to, piece));
    }
}

/// Appends the castling moves that are legal right now.
///
/// Requirements per side: king and rook unmoved, the squares strictly
/// between them empty, and none of the king's current, transit or
/// destination squares threatened before the move.
fn castling_moves(board: &Board, player: Color, out: &mut Vec<Move>) {
    let home_rank = match player {
        Color::White => 1,
        Color::Black => 8,
    };
    let at = |file: u8| Square::from_coords(file - b'A', home_rank);

    let king_home = at(b'E');
    let king_ready = board
        .piece_at(king_home)
        .is_some_and(|p| p.kind == PieceKind::King && p.color == player && !p.has_moved);
    if !king_ready {
        return;
    }

    let mut threatened = None;
    for side in [CastlingSide::Long, CastlingSide::Short] {
        let (rook_file, empty_files, safe_files): (u8, &[u8], &[u8]) = match side {
            CastlingSide::Long => (b'A', &[b'B', b'C', b'D'], &[b'C', b'D', b'E']),
            CastlingSide::Short => (b'H', &[b'F', b'G'], &[b'E', b'F', b'G']),
        };

        let rook_ready = board
            .piece_at(at(rook_file))
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == player && !p.has_moved);

        if !rook_ready || empty_files.iter().any(|&f| board.piece_at(at(f)).is_some()) {
            continue;
        }

        let threatened =
            threatened.get_or_insert_with(|| threatened_squares(board, player));
        if safe_files.iter().any(|&f| threatened.contains(&at(f))) {
            continue;
        }

        out.push(Move::Castling {
            owner: player,
            side,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn place(board: &mut Board, at: &str, kind: PieceKind, color: Color) {
        board.set(sq(at), Some(Piece::new(kind, color)));
    }

    fn place_moved(board: &mut Board, at: &str, kind: PieceKind, color: Color) {
        let mut piece = Piece::new(kind, color);
        piece.has_moved = true;
        board.set(sq(at), Some(piece));
    }

    fn endpoints(moves: &[Move]) -> Vec<(Square, Square)> {
        moves
            .iter()
            .filter_map(|mv| match mv {
                Move::Plain { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initial_position_has_twenty_one_moves() {
        let board = Board::initial();
        let moves = generate_moves(&board);
        assert_eq!(moves.len(), 21);

        let specials: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::Special { .. }))
            .collect();
        assert_eq!(
            specials,
            vec![&Move::special(Color::White, SpecialKind::Resign)]
        );

        let pawn_pushes = moves
            .iter()
            .filter(|m| matches!(m, Move::Plain { piece, .. } if piece.kind == PieceKind::Pawn))
            .count();
        assert_eq!(pawn_pushes, 16);

        let knight_moves = moves
            .iter()
            .filter(|m| matches!(m, Move::Plain { piece, .. } if piece.kind == PieceKind::Knight))
            .count();
        assert_eq!(knight_moves, 4);

        assert!(!moves.iter().any(|m| matches!(m, Move::Castling { .. })));
    }

    #[test]
    fn black_also_has_twenty_one_initial_moves() {
        let board = Board::initial();
        assert_eq!(generate_moves_for(&board, Color::Black).len(), 21);
    }

    #[test]
    fn initial_threats_are_the_knight_squares() {
        let board = Board::initial();
        // Threats against White come from Black's knights only: pawn attacks
        // exist only onto occupied squares, everything else is blocked in.
        let threats = threatened_squares(&board, Color::White);
        let expected: HashSet<Square> =
            [sq("A6"), sq("C6"), sq("F6"), sq("H6")].into_iter().collect();
        assert_eq!(threats, expected);
    }

    #[test]
    fn threats_are_pure_in_board_and_player() {
        let board = Board::initial();
        assert_eq!(
            threatened_squares(&board, Color::Black),
            threatened_squares(&board, Color::Black)
        );
    }

    #[test]
    fn rook_slides_stop_at_blockers() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);
        place(&mut board, "D4", PieceKind::Rook, Color::White);
        place(&mut board, "D6", PieceKind::Pawn, Color::Black);
        place(&mut board, "D2", PieceKind::Pawn, Color::White);

        let moves = generate_moves(&board);
        let rook_targets: Vec<Square> = endpoints(&moves)
            .into_iter()
            .filter(|(from, _)| *from == sq("D4"))
            .map(|(_, to)| to)
            .collect();

        assert!(rook_targets.contains(&sq("D5")));
        assert!(rook_targets.contains(&sq("D6"))); // capture on the blocker
        assert!(!rook_targets.contains(&sq("D7"))); // not beyond it
        assert!(rook_targets.contains(&sq("D3")));
        assert!(!rook_targets.contains(&sq("D2"))); // own pawn blocks
        assert!(rook_targets.contains(&sq("A4")));
        assert!(rook_targets.contains(&sq("H4")));
    }

    #[test]
    fn pinned_piece_may_not_expose_the_king() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "E4", PieceKind::Knight, Color::White);
        place(&mut board, "E8", PieceKind::Rook, Color::Black);
        place(&mut board, "A8", PieceKind::King, Color::Black);

        let moves = generate_moves(&board);
        assert!(
            !endpoints(&moves).iter().any(|(from, _)| *from == sq("E4")),
            "the pinned knight must have no legal moves"
        );
    }

    #[test]
    fn pawn_double_step_requires_unmoved_pawn_and_clear_path() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);
        place(&mut board, "B2", PieceKind::Pawn, Color::White);
        place_moved(&mut board, "D2", PieceKind::Pawn, Color::White);
        place(&mut board, "F2", PieceKind::Pawn, Color::White);
        place(&mut board, "F3", PieceKind::Knight, Color::Black);

        let moves = endpoints(&generate_moves(&board));
        assert!(moves.contains(&(sq("B2"), sq("B4"))));
        assert!(!moves.contains(&(sq("D2"), sq("D4")))); // already moved
        assert!(!moves.contains(&(sq("F2"), sq("F4")))); // blocked at F3
        assert!(!moves.contains(&(sq("F2"), sq("F3")))); // occupied
    }

    #[test]
    fn pawn_promotion_produces_four_variants() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "H8", PieceKind::King, Color::Black);
        place_moved(&mut board, "A7", PieceKind::Pawn, Color::White);

        let moves = generate_moves(&board);
        let promotions: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::Promotion { .. }))
            .collect();
        assert_eq!(promotions.len(), 4);

        let kinds: HashSet<PieceKind> = promotions
            .iter()
            .map(|m| match m {
                Move::Promotion { promote_to, .. } => *promote_to,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(kinds.len(), 4);
        assert!(kinds.contains(&PieceKind::Queen));
        assert!(kinds.contains(&PieceKind::Knight));
    }

    #[test]
    fn en_passant_is_generated_when_the_flag_is_set() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);
        place_moved(&mut board, "E5", PieceKind::Pawn, Color::White);
        let mut black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        black_pawn.has_moved = true;
        black_pawn.en_passant_capturable = true;
        board.set(sq("D5"), Some(black_pawn));

        let moves = generate_moves(&board);
        let ep = moves.iter().find(|m| matches!(m, Move::EnPassant { .. }));
        match ep {
            Some(Move::EnPassant { from, to, victim }) => {
                assert_eq!(*from, sq("E5"));
                assert_eq!(*to, sq("D6"));
                assert_eq!(*victim, sq("D5"));
            }
            _ => panic!("expected an en passant move, got {moves:?}"),
        }
    }

    #[test]
    fn en_passant_requires_the_flag() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);
        place_moved(&mut board, "E5", PieceKind::Pawn, Color::White);
        place_moved(&mut board, "D5", PieceKind::Pawn, Color::Black);

        let moves = generate_moves(&board);
        assert!(!moves.iter().any(|m| matches!(m, Move::EnPassant { .. })));
    }

    #[test]
    fn castling_available_when_path_clear_and_safe() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "A1", PieceKind::Rook, Color::White);
        place(&mut board, "H1", PieceKind::Rook, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);

        let moves = generate_moves(&board);
        let castlings: Vec<_> = moves
            .iter()
            .filter_map(|m| match m {
                Move::Castling { side, .. } => Some(*side),
                _ => None,
            })
            .collect();
        assert_eq!(castlings.len(), 2);
        assert!(castlings.contains(&CastlingSide::Short));
        assert!(castlings.contains(&CastlingSide::Long));
    }

    #[test]
    fn castling_blocked_by_threatened_transit_square() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "A1", PieceKind::Rook, Color::White);
        place(&mut board, "H1", PieceKind::Rook, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);
        // Black rook covers F1: short castling transits it, long does not.
        place_moved(&mut board, "F8", PieceKind::Rook, Color::Black);

        let moves = generate_moves(&board);
        let castlings: Vec<_> = moves
            .iter()
            .filter_map(|m| match m {
                Move::Castling { side, .. } => Some(*side),
                _ => None,
            })
            .collect();
        assert_eq!(castlings, vec![CastlingSide::Long]);
    }

    #[test]
    fn castling_gone_after_king_moved() {
        let mut board = Board::empty();
        place_moved(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "A1", PieceKind::Rook, Color::White);
        place(&mut board, "H1", PieceKind::Rook, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);

        let moves = generate_moves(&board);
        assert!(!moves.iter().any(|m| matches!(m, Move::Castling { .. })));
    }

    #[test]
    fn castling_blocked_by_piece_between() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        place(&mut board, "A1", PieceKind::Rook, Color::White);
        place(&mut board, "B1", PieceKind::Knight, Color::White);
        place(&mut board, "E8", PieceKind::King, Color::Black);

        let moves = generate_moves(&board);
        assert!(!moves.iter().any(|m| matches!(m, Move::Castling { .. })));
    }

    #[test]
    fn resignation_ends_generation() {
        let board = Board::initial();
        let resigned =
            game::apply_move_unchecked(&board, &Move::special(Color::White, SpecialKind::Resign));
        assert!(generate_moves(&resigned).is_empty());
    }

    #[test]
    fn pending_draw_offer_only_allows_the_two_answers() {
        let mut board = Board::initial();
        // Fast-forward the ply count so the offer becomes available.
        for _ in 0..31 {
            board = game::apply_move_unchecked(
                &board,
                &Move::special(board.current_player(), SpecialKind::DrawDecline),
            );
        }
        let offered = game::apply_move_unchecked(
            &board,
            &Move::special(board.current_player(), SpecialKind::DrawOffer),
        );
        let player = offered.current_player();
        let moves = generate_moves(&offered);
        assert_eq!(
            moves,
            vec![
                Move::special(player, SpecialKind::DrawAccept),
                Move::special(player, SpecialKind::DrawDecline),
            ]
        );
    }

    #[test]
    fn draw_offer_available_after_thirty_plies() {
        let mut board = Board::initial();
        for _ in 0..31 {
            board = game::apply_move_unchecked(
                &board,
                &Move::special(board.current_player(), SpecialKind::DrawDecline),
            );
        }
        let moves = generate_moves(&board);
        assert!(moves
            .iter()
            .any(|m| matches!(m, Move::Special { kind: SpecialKind::DrawOffer, .. })));
    }

    #[test]
    #[should_panic(expected = "no black king")]
    fn missing_king_fails_loudly() {
        let mut board = Board::empty();
        place(&mut board, "E1", PieceKind::King, Color::White);
        is_in_check(&board, Color::Black);
    }
}
