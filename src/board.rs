//! Game board representation and line clearing

use ratatui::style::Color;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The settled blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at (x, y), None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Whether (x, y) holds a settled block.
    ///
    /// Callers must stay inside the board; the collision check filters
    /// coordinates before asking.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        assert!(
            x < self.width && y < self.height(),
            "board access out of range: ({x}, {y})"
        );
        self.rows[y][x].is_filled()
    }

    /// Fill a cell with a color. Only used when locking a piece.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(
            x < self.width && y < self.height(),
            "board write out of range: ({x}, {y})"
        );
        self.rows[y][x] = Cell::Filled(color);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Surviving rows keep their relative order and sink to the bottom;
    /// the same number of empty rows is added at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let height = self.height();
        self.rows
            .retain(|row| row.iter().any(|cell| cell.is_empty()));
        let cleared = height - self.rows.len();

        let mut refilled = vec![vec![Cell::Empty; self.width]; cleared];
        refilled.append(&mut self.rows);
        self.rows = refilled;

        cleared
    }
}

#[cfg(test)]
impl Board {
    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }
}
