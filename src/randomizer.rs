//! Random shape and color selection for spawning pieces
//!
//! Shape and color are drawn independently and uniformly, unlike a
//! 7-bag: any piece may repeat any number of times.

use crate::tetromino::{TetrominoType, PALETTE};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::style::Color;

/// Seedable source of spawn choices
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Randomizer {
    /// Create a deterministic randomizer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_type(&mut self) -> TetrominoType {
        *TetrominoType::all()
            .choose(&mut self.rng)
            .unwrap_or(&TetrominoType::I)
    }

    pub fn next_color(&mut self) -> Color {
        *PALETTE.choose(&mut self.rng).unwrap_or(&PALETTE[0])
    }
}
