//! Tetromino definitions, shapes and the color palette

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    T,
    O, // square
    S,
    Z,
    L,
    J,
}

impl TetrominoType {
    /// Get all tetromino types
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::T,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::L,
            TetrominoType::J,
        ]
    }

    /// Spawn orientation of this tetromino
    pub fn shape(&self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoType::I => &[&[1, 1, 1, 1]],
            TetrominoType::T => &[&[1, 1, 1], &[0, 1, 0]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoType::L => &[&[1, 1, 1], &[1, 0, 0]],
            TetrominoType::J => &[&[1, 1, 1], &[0, 0, 1]],
        };
        Shape::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&cell| cell != 0).collect())
                .collect(),
        )
    }
}

/// Piece colors. Chosen independently of the shape at spawn time.
pub const PALETTE: [Color; 7] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Rgb(255, 165, 0), // Orange
    Color::Red,
    Color::Green,
    Color::Blue,
];

/// A rectangular occupancy matrix, row 0 on top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from rows of equal length
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        debug_assert!(
            rows.windows(2).all(|pair| pair[0].len() == pair[1].len()),
            "shape rows must have equal length"
        );
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Offsets (col, row) of every occupied cell
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Rotate 90° clockwise: reverse the row order, then transpose.
    pub fn rotated_cw(&self) -> Shape {
        let height = self.height();
        let rows = (0..self.width())
            .map(|col| {
                (0..height)
                    .map(|row| self.rows[height - 1 - row][col])
                    .collect()
            })
            .collect();
        Shape { rows }
    }
}
