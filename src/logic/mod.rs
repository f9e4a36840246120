//! The chess rules core: board representation, move generation, move
//! application and outcome classification.

pub mod board;
pub mod cache;
pub mod game;
pub mod moves;
pub mod rules;
