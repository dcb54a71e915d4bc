//! Score tracking

/// Points awarded per cleared line
pub const LINE_CLEAR_POINTS: u64 = 100;

/// Running score and session counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces locked onto the board
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lock event that cleared `lines` rows
    pub fn add_lock(&mut self, lines: usize) {
        self.pieces += 1;
        self.lines += lines as u32;
        self.points += LINE_CLEAR_POINTS * lines as u64;
    }
}
