//! Game outcome and win detection.

use common::PlayerId;
use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, Mark};

/// Status of a game.
///
/// ```text
/// WaitingForPlayers ──► InProgress ──┬──► HorizontalWin
///                                    ├──► VerticalWin
///                                    ├──► DiagonalWin
///                                    └──► Draw
/// ```
///
/// Waiting for players is not a distinct status: a game without moves is
/// `InProgress`. Every status other than `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,

    #[serde(rename = "Horizontal Win")]
    HorizontalWin,

    #[serde(rename = "Vertical Win")]
    VerticalWin,

    #[serde(rename = "Diagonal Win")]
    DiagonalWin,

    #[serde(rename = "Draw")]
    Draw,
}

impl GameStatus {
    /// Evaluates a grid of marks from scratch.
    ///
    /// Rows are checked before columns before diagonals; the first complete
    /// line decides the label. A full grid without a line is a draw.
    pub fn evaluate(marks: &[[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let line = |cells: [(usize, usize); BOARD_SIZE]| {
            let [a, b, c] = cells.map(|(row, column)| marks[row][column]);
            a.is_some() && a == b && b == c
        };

        if (0..BOARD_SIZE).any(|r| line([(r, 0), (r, 1), (r, 2)])) {
            GameStatus::HorizontalWin
        } else if (0..BOARD_SIZE).any(|c| line([(0, c), (1, c), (2, c)])) {
            GameStatus::VerticalWin
        } else if line([(0, 0), (1, 1), (2, 2)]) || line([(0, 2), (1, 1), (2, 0)]) {
            GameStatus::DiagonalWin
        } else if marks.iter().flatten().all(Option::is_some) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Returns true for any of the three win statuses.
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            GameStatus::HorizontalWin | GameStatus::VerticalWin | GameStatus::DiagonalWin
        )
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "In Progress",
            GameStatus::HorizontalWin => "Horizontal Win",
            GameStatus::VerticalWin => "Vertical Win",
            GameStatus::DiagonalWin => "Diagonal Win",
            GameStatus::Draw => "Draw",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable snapshot of a game's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,

    /// Author of the winning move; absent for draws and games in progress.
    pub winner: Option<PlayerId>,
}

impl GameState {
    pub fn new(status: GameStatus, winner: Option<PlayerId>) -> Self {
        Self { status, winner }
    }

    pub fn in_progress() -> Self {
        Self::new(GameStatus::InProgress, None)
    }

    /// Returns true for any status other than `InProgress`.
    pub fn is_ended(&self) -> bool {
        self.status.is_terminal()
    }
}
