//! Collision detection between a shape and the board

use crate::board::Board;
use crate::tetromino::Shape;

/// Check whether `shape` placed with its top-left at `offset` (x, y)
/// leaves the board sideways, sinks below the floor, or overlaps a
/// settled block.
///
/// Rows above the top edge (negative y) count as open space.
pub fn check_collision(board: &Board, shape: &Shape, offset: (i32, i32)) -> bool {
    let (x_offset, y_offset) = offset;
    let width = board.width() as i32;
    let height = board.height() as i32;

    shape.filled().any(|(x, y)| {
        let board_x = x + x_offset;
        let board_y = y + y_offset;
        if board_x < 0 || board_x >= width || board_y >= height {
            return true;
        }
        board_y >= 0 && board.is_occupied(board_x as usize, board_y as usize)
    })
}
