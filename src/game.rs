//! Core game state and logic

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use std::time::Duration;
use tracing::{debug, info};

/// Default time between gravity ticks
pub const GRAVITY_INTERVAL: Duration = Duration::from_millis(500);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCW,
    Quit,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece. Undrawn once the game is over.
    pub current_piece: Piece,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Spawn choices
    randomizer: Randomizer,
    /// Time accumulated since the last gravity tick
    fall_timer: Duration,
    gravity_interval: Duration,
    /// Set by the quit action in any state
    quit_requested: bool,
}

impl Game {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        let board = Board::default();
        let mut randomizer = Randomizer::with_seed(seed);
        let current_piece = Piece::spawn(&mut randomizer, board.width());

        Self {
            board,
            current_piece,
            score: Score::new(),
            state: GameState::Running,
            randomizer,
            fall_timer: Duration::ZERO,
            gravity_interval: GRAVITY_INTERVAL,
            quit_requested: false,
        }
    }

    /// Override the time between gravity ticks
    pub fn with_gravity_interval(mut self, interval: Duration) -> Self {
        self.gravity_interval = interval;
        self
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.quit_requested = true;
            return;
        }
        if self.state != GameState::Running {
            return;
        }

        let piece = &mut self.current_piece;
        let moved = match action {
            Action::MoveLeft => piece.move_left(&self.board),
            Action::MoveRight => piece.move_right(&self.board),
            Action::SoftDrop => piece.move_down(&self.board),
            Action::RotateCW => piece.rotate_cw(&self.board),
            Action::Quit => false,
        };
        if !moved {
            debug!(?action, "action rejected");
        }
    }

    /// Advance the fall timer (call every frame with the time since the last call)
    pub fn update(&mut self, elapsed: Duration) {
        if self.state != GameState::Running {
            return;
        }

        self.fall_timer += elapsed;
        if self.fall_timer > self.gravity_interval {
            self.gravity_tick();
            self.fall_timer = Duration::ZERO;
        }
    }

    /// Move the piece down one row, locking it if it cannot move
    pub fn gravity_tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        if !self.current_piece.move_down(&self.board) {
            self.lock_piece();
        }
    }

    /// Lock the current piece, clear lines and spawn the next piece
    fn lock_piece(&mut self) {
        let piece = &self.current_piece;
        for (x, y) in piece.cells() {
            // Rows above the top edge are not part of the board
            if y >= 0 {
                self.board.set(x as usize, y as usize, piece.color);
            }
        }

        let lines_cleared = self.board.clear_full_rows();
        self.score.add_lock(lines_cleared);
        debug!(
            piece = ?piece.piece_type,
            x = piece.x,
            y = piece.y,
            lines_cleared,
            points = self.score.points,
            "piece locked"
        );

        self.current_piece = Piece::spawn(&mut self.randomizer, self.board.width());
        debug!(piece = ?self.current_piece.piece_type, "spawned");

        if self.current_piece.collides(&self.board) {
            self.state = GameState::GameOver;
            info!(
                points = self.score.points,
                lines = self.score.lines,
                pieces = self.score.pieces,
                "game over"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::score::LINE_CLEAR_POINTS;
    use crate::tetromino::TetrominoType;
    use ratatui::style::Color;

    const TICK: Duration = Duration::from_millis(501);

    fn game_with(piece_type: TetrominoType) -> Game {
        let mut game = Game::with_seed(1);
        game.current_piece = Piece::new(piece_type, Color::Yellow, BOARD_WIDTH);
        game
    }

    #[test]
    fn test_new_game_is_running() {
        let game = Game::with_seed(9);
        assert_eq!(game.state, GameState::Running);
        assert!(game.board.is_empty());
        assert_eq!(game.current_piece.y, 0);
        assert_eq!(game.score, Score::new());
    }

    #[test]
    fn test_four_gravity_ticks_without_lock() {
        let mut game = game_with(TetrominoType::O);
        for _ in 0..4 {
            game.update(TICK);
        }
        assert_eq!(game.current_piece.y, 4);
        assert_eq!(game.current_piece.piece_type, TetrominoType::O);
        assert_eq!(game.score.pieces, 0);
        assert!(game.board.is_empty());
    }

    #[test]
    fn test_gravity_needs_interval_exceeded() {
        let mut game = game_with(TetrominoType::O);
        game.update(GRAVITY_INTERVAL);
        assert_eq!(game.current_piece.y, 0);
        game.update(Duration::from_millis(1));
        assert_eq!(game.current_piece.y, 1);
    }

    #[test]
    fn test_timer_resets_after_tick() {
        let mut game = game_with(TetrominoType::O);
        // One huge frame still only moves one row
        game.update(Duration::from_secs(10));
        assert_eq!(game.current_piece.y, 1);
        game.update(Duration::from_millis(300));
        assert_eq!(game.current_piece.y, 1);
    }

    #[test]
    fn test_custom_gravity_interval() {
        let mut game = game_with(TetrominoType::O).with_gravity_interval(Duration::from_millis(100));
        game.update(Duration::from_millis(101));
        assert_eq!(game.current_piece.y, 1);
    }

    #[test]
    fn test_lock_on_floor_spawns_next() {
        let mut game = game_with(TetrominoType::O);
        game.current_piece.y = BOARD_HEIGHT as i32 - 2;
        game.gravity_tick();

        assert_eq!(game.score.pieces, 1);
        assert_eq!(game.current_piece.y, 0);
        let bottom = BOARD_HEIGHT as i32 - 1;
        assert_eq!(game.board.get(4, bottom).map(|c| c.is_filled()), Some(true));
        assert_eq!(game.board.get(5, bottom - 1).map(|c| c.is_filled()), Some(true));
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn test_locking_last_cell_clears_one_line() {
        let mut game = Game::with_seed(5);
        let bottom = BOARD_HEIGHT - 1;
        for x in 1..BOARD_WIDTH {
            game.board.set(x, bottom, Color::Red);
        }
        // Vertical I dropped into the gap at column 0
        let mut piece = Piece::new(TetrominoType::I, Color::Cyan, BOARD_WIDTH);
        piece.shape = piece.shape.rotated_cw();
        piece.x = 0;
        piece.y = BOARD_HEIGHT as i32 - 4;
        game.current_piece = piece;

        let before = game.score.points;
        game.gravity_tick();

        assert_eq!(game.score.lines, 1);
        assert_eq!(game.score.points - before, LINE_CLEAR_POINTS);
        // The rest of the I sank by one row
        for y in BOARD_HEIGHT - 3..BOARD_HEIGHT {
            assert!(game.board.is_occupied(0, y));
        }
        assert!(!game.board.is_occupied(0, BOARD_HEIGHT - 4));
        assert!(!game.board.is_occupied(1, bottom));
    }

    #[test]
    fn test_spawn_into_blocks_is_game_over() {
        let mut game = game_with(TetrominoType::O);
        // Top rows filled except column 0 so they are not cleared
        for y in 0..2 {
            for x in 1..BOARD_WIDTH {
                game.board.set(x, y, Color::Green);
            }
        }
        game.current_piece.x = 6;
        game.current_piece.y = BOARD_HEIGHT as i32 - 2;

        game.gravity_tick();

        assert_eq!(game.state, GameState::GameOver);
        assert!(game.is_game_over());
        assert_eq!(game.score.points, 0);
        assert_eq!(game.score.pieces, 1);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut game = game_with(TetrominoType::O);
        game.state = GameState::GameOver;
        let piece = game.current_piece.clone();
        let board = game.board.clone();

        game.process_action(Action::MoveLeft);
        game.process_action(Action::SoftDrop);
        game.process_action(Action::RotateCW);
        for _ in 0..50 {
            game.update(TICK);
        }
        game.gravity_tick();

        assert_eq!(game.current_piece, piece);
        assert_eq!(game.board, board);
        assert!(!game.quit_requested());
    }

    #[test]
    fn test_quit_in_any_state() {
        let mut running = Game::with_seed(2);
        running.process_action(Action::Quit);
        assert!(running.quit_requested());

        let mut over = Game::with_seed(2);
        over.state = GameState::GameOver;
        over.process_action(Action::Quit);
        assert!(over.quit_requested());
    }

    #[test]
    fn test_moves_and_rotation() {
        let mut game = game_with(TetrominoType::T);
        game.process_action(Action::MoveLeft);
        assert_eq!(game.current_piece.x, 3);
        game.process_action(Action::MoveRight);
        game.process_action(Action::MoveRight);
        assert_eq!(game.current_piece.x, 5);
        game.process_action(Action::SoftDrop);
        assert_eq!(game.current_piece.y, 1);
        game.process_action(Action::RotateCW);
        assert_eq!(game.current_piece.shape, TetrominoType::T.shape().rotated_cw());
    }

    #[test]
    fn test_rejected_move_leaves_piece_unchanged() {
        let mut game = game_with(TetrominoType::O);
        game.current_piece.x = 0;
        let before = game.current_piece.clone();
        game.process_action(Action::MoveLeft);
        assert_eq!(game.current_piece, before);
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut game = game_with(TetrominoType::O);
        for _ in 0..BOARD_HEIGHT * 2 {
            game.process_action(Action::SoftDrop);
        }
        assert_eq!(game.current_piece.y, BOARD_HEIGHT as i32 - 2);
        assert_eq!(game.score.pieces, 0);
        assert!(game.board.is_empty());
    }
}
