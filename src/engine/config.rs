//! Tunable engine parameters.

use crate::engine::InvalidConfiguration;
use crate::logic::board::PieceKind;
use serde::{Deserialize, Serialize};

/// Piece values and search depth, loadable from JSON.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    /// Plies the alpha-beta search looks ahead. Must be at least 1.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: 100,
            val_knight: 300,
            val_bishop: 300,
            val_rook: 500,
            val_queen: 900,
            val_king: 10_000,
            max_depth: 3,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document. Missing fields fall
    /// back to their defaults.
    pub fn load_from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks the settings a strategy cannot tolerate being wrong.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.max_depth < 1 {
            return Err(InvalidConfiguration);
        }
        Ok(())
    }

    #[must_use]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.val_pawn,
            PieceKind::Knight => self.val_knight,
            PieceKind::Bishop => self.val_bishop,
            PieceKind::Rook => self.val_rook,
            PieceKind::Queen => self.val_queen,
            PieceKind::King => self.val_king,
        }
    }
}
