use crate::logic::moves::Move;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use std::str::FromStr;

/// The two sides of a chess game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// A piece standing on the board.
///
/// `has_moved` feeds castling and pawn double-step eligibility.
/// `en_passant_capturable` is only ever true on a pawn, and only for the
/// single ply following its two-square advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
    pub en_passant_capturable: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
            en_passant_capturable: false,
        }
    }

    /// FEN-style letter: uppercase for White, lowercase for Black.
    #[must_use]
    pub const fn as_char(self) -> char {
        let c = match self.kind {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// Error for a file/rank pair or square notation outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange;

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "square is outside the board (files A-H, ranks 1-8)")
    }
}

impl std::error::Error for OutOfRange {}

/// A board square, addressed algebraically (file `A..=H`, rank `1..=8`).
///
/// Squares also map onto a flat 0-63 index where 0 is A8 and 63 is H1
/// (row-major, top rank first), matching the array layout of [`Board`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Square {
    file: u8, // 0 = A .. 7 = H
    rank: u8, // 1..=8
}

impl Square {
    /// Builds a square from its algebraic file letter and rank number.
    pub fn new(file: char, rank: u8) -> Result<Self, OutOfRange> {
        let file = file.to_ascii_uppercase();
        if !('A'..='H').contains(&file) || !(1..=8).contains(&rank) {
            return Err(OutOfRange);
        }
        Ok(Self {
            file: file as u8 - b'A',
            rank,
        })
    }

    /// Builds a square from its flat array index (0 = A8 .. 63 = H1).
    pub fn from_index(index: usize) -> Result<Self, OutOfRange> {
        if index > 63 {
            return Err(OutOfRange);
        }
        Ok(Self {
            file: (index % 8) as u8,
            rank: 8 - (index / 8) as u8,
        })
    }

    /// Internal constructor for coordinates already known to be valid.
    pub(crate) const fn from_coords(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank >= 1 && rank <= 8);
        Self { file, rank }
    }

    #[must_use]
    pub const fn file(self) -> char {
        (b'A' + self.file) as char
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn index(self) -> usize {
        (8 - self.rank as usize) * 8 + self.file as usize
    }

    /// Whether the square is one of the dark squares of the board.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        ((self.rank - 1) + self.file) % 2 == 0
    }

    /// The square `files` to the east and `ranks` to the north, if it is
    /// still on the board. North is the direction White pawns advance.
    #[must_use]
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = i16::from(self.file) + i16::from(files);
        let rank = i16::from(self.rank) + i16::from(ranks);
        if (0..8).contains(&file) && (1..=8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Iterates every square of the board in index order (A8 .. H1).
    pub fn all() -> impl Iterator<Item = Self> {
        (0..64).map(|i| Self {
            file: (i % 8) as u8,
            rank: 8 - (i / 8) as u8,
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank)
    }
}

impl FromStr for Square {
    type Err = OutOfRange;

    fn from_str(s: &str) -> Result<Self, OutOfRange> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                let rank = rank.to_digit(10).ok_or(OutOfRange)?;
                Self::new(file, rank as u8)
            }
            _ => Err(OutOfRange),
        }
    }
}

/// The full game position: piece placement, side to move and move history.
///
/// Boards are value objects. Every engine operation that changes a position
/// clones the board and returns the clone; a board handed to a caller is
/// never mutated again. `Clone` produces a fully independent copy, which is
/// the crate's only concurrency tool — each call site owns its boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    squares: [Option<Piece>; 64],
    current_player: Color,
    history: Vec<Move>,
}

impl Board {
    /// An empty board with White to move. Used to set up test positions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            current_player: Color::White,
            history: Vec::new(),
        }
    }

    /// The standard starting position: all 32 pieces placed, White to move,
    /// empty history.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.setup_back_rank(Color::White, 1);
        board.setup_back_rank(Color::Black, 8);
        for file in 0..8 {
            board.set(
                Square::from_coords(file, 2),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.set(
                Square::from_coords(file, 7),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
        }
        board
    }

    fn setup_back_rank(&mut self, color: Color, rank: u8) {
        use PieceKind::{Bishop, King, Knight, Queen, Rook};
        let order = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, &kind) in order.iter().enumerate() {
            self.set(
                Square::from_coords(file as u8, rank),
                Some(Piece::new(kind, color)),
            );
        }
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Relocates whatever stands on `from` to `to` and returns the piece
    /// previously occupying `to` (the capture victim, if any).
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let victim = self.squares[to.index()];
        self.squares[to.index()] = self.squares[from.index()].take();
        victim
    }

    #[must_use]
    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Iterates the occupied squares together with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| (Square::from_coords((i % 8) as u8, 8 - (i / 8) as u8), piece)))
    }

    pub(crate) fn toggle_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    pub(crate) fn set_current_player(&mut self, player: Color) {
        self.current_player = player;
    }

    pub(crate) fn push_history(&mut self, mv: Move) {
        self.history.push(mv);
    }
}
