//! Active falling piece logic

use crate::board::Board;
use crate::collision::check_collision;
use crate::randomizer::Randomizer;
use crate::tetromino::{Shape, TetrominoType};
use ratatui::style::Color;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current orientation
    pub shape: Shape,
    /// Every occupied cell carries this color
    pub color: Color,
    /// Board column of the shape's left edge
    pub x: i32,
    /// Board row of the shape's top edge, row 0 is the top
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn position: top row, horizontally centered
    pub fn new(piece_type: TetrominoType, color: Color, board_width: usize) -> Self {
        let shape = piece_type.shape();
        let x = (board_width / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            piece_type,
            shape,
            color,
            x,
            y: 0,
        }
    }

    /// Spawn a piece with a random type and color
    pub fn spawn(randomizer: &mut Randomizer, board_width: usize) -> Self {
        let piece_type = randomizer.next_type();
        let color = randomizer.next_color();
        Self::new(piece_type, color, board_width)
    }

    /// Get the absolute (x, y) positions of all occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece overlaps a wall, the floor or a settled block
    pub fn collides(&self, board: &Board) -> bool {
        check_collision(board, &self.shape, (self.x, self.y))
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1, 0)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1, 0)
    }

    /// Try to move down one row, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.shift(board, 0, 1)
    }

    fn shift(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        if check_collision(board, &self.shape, (self.x + dx, self.y + dy)) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Try to rotate clockwise in place. A colliding rotation is rejected
    /// outright; there are no wall kicks.
    pub fn rotate_cw(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();
        if check_collision(board, &rotated, (self.x, self.y)) {
            return false;
        }
        self.shape = rotated;
        true
    }
}
