use crate::logic::board::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which wing the king castles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    Short,
    Long,
}

/// Protocol actions recorded in the history alongside board moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    Resign,
    DrawOffer,
    DrawAccept,
    DrawDecline,
}

/// King and rook endpoints of a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// A move between two positions, or a protocol action.
///
/// Plain moves carry a snapshot of the moving piece and a capture flag for
/// rendering; equality deliberately ignores both and compares endpoints
/// only, so a caller-constructed move matches the generated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Move {
    Plain {
        from: Square,
        to: Square,
        piece: Piece,
        capture: bool,
    },
    Promotion {
        from: Square,
        to: Square,
        promote_to: PieceKind,
    },
    EnPassant {
        from: Square,
        to: Square,
        /// The square of the captured pawn, distinct from `to`.
        victim: Square,
    },
    Castling {
        owner: Color,
        side: CastlingSide,
    },
    Special {
        owner: Color,
        kind: SpecialKind,
    },
}

impl Move {
    #[must_use]
    pub const fn special(owner: Color, kind: SpecialKind) -> Self {
        Self::Special { owner, kind }
    }

    /// The king and rook squares a castling move relocates.
    #[must_use]
    pub fn castling_squares(owner: Color, side: CastlingSide) -> CastlingSquares {
        let rank = match owner {
            Color::White => 1,
            Color::Black => 8,
        };
        let file = |c: u8| Square::from_coords(c - b'A', rank);
        match side {
            CastlingSide::Short => CastlingSquares {
                king_from: file(b'E'),
                king_to: file(b'G'),
                rook_from: file(b'H'),
                rook_to: file(b'F'),
            },
            CastlingSide::Long => CastlingSquares {
                king_from: file(b'E'),
                king_to: file(b'C'),
                rook_from: file(b'A'),
                rook_to: file(b'D'),
            },
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Plain { from: a, to: b, .. },
                Self::Plain { from: c, to: d, .. },
            ) => a == c && b == d,
            (
                Self::Promotion {
                    from: a,
                    to: b,
                    promote_to: p,
                },
                Self::Promotion {
                    from: c,
                    to: d,
                    promote_to: q,
                },
            ) => a == c && b == d && p == q,
            (
                Self::EnPassant {
                    from: a,
                    to: b,
                    victim: v,
                },
                Self::EnPassant {
                    from: c,
                    to: d,
                    victim: w,
                },
            ) => a == c && b == d && v == w,
            (
                Self::Castling { owner: a, side: s },
                Self::Castling { owner: b, side: t },
            ) => a == b && s == t,
            (
                Self::Special { owner: a, kind: k },
                Self::Special { owner: b, kind: l },
            ) => a == b && k == l,
            _ => false,
        }
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Plain { from, to, .. } => {
                from.hash(state);
                to.hash(state);
            }
            Self::Promotion {
                from,
                to,
                promote_to,
            } => {
                from.hash(state);
                to.hash(state);
                promote_to.hash(state);
            }
            Self::EnPassant { from, to, victim } => {
                from.hash(state);
                to.hash(state);
                victim.hash(state);
            }
            Self::Castling { owner, side } => {
                owner.hash(state);
                side.hash(state);
            }
            Self::Special { owner, kind } => {
                owner.hash(state);
                kind.hash(state);
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain {
                from,
                to,
                piece,
                capture,
            } => {
                if *capture {
                    write!(f, "{}{from}x{to}", piece.as_char())
                } else {
                    write!(f, "{}{from}{to}", piece.as_char())
                }
            }
            Self::Promotion {
                from,
                to,
                promote_to,
            } => {
                let target = Piece::new(*promote_to, Color::White).as_char();
                write!(f, "{from}{to}={target}")
            }
            Self::EnPassant { from, to, .. } => write!(f, "{from}x{to}e.p."),
            Self::Castling { side, .. } => match side {
                CastlingSide::Short => write!(f, "O-O"),
                CastlingSide::Long => write!(f, "O-O-O"),
            },
            Self::Special { kind, .. } => match kind {
                SpecialKind::Resign => write!(f, "resign"),
                SpecialKind::DrawOffer => write!(f, "draw offer"),
                SpecialKind::DrawAccept => write!(f, "draw accept"),
                SpecialKind::DrawDecline => write!(f, "draw decline"),
            },
        }
    }
}
