use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: u8 = 8;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Returns `true` for dark squares, the only squares pieces may occupy.
    pub fn playable(self) -> bool {
        self.in_bounds() && (self.row + self.col) % 2 == 1
    }

    /// Offsets by a signed delta. `None` when the result leaves the grid.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

/// The two sides. Red starts at the bottom (rows 5-7) and moves toward
/// decreasing row; Black starts at the top and moves toward increasing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row direction a man of this side is allowed to move in.
    pub fn forward(self) -> i8 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// The opponent's back rank, where a man of this side promotes.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rank {
    Man,
    King,
}

/// A checker. Its position is the board cell holding it; the owner is fixed
/// for the piece's whole life, only the rank may change (man to king).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Self {
            owner,
            rank: Rank::Man,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }
}

/// Kind of a candidate move, derived from its displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveKind {
    Simple,
    Jump,
}

/// A start/end square pair. The kind and the captured square (for jumps)
/// are derived from the displacement, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// `None` when the displacement is neither a step nor a jump diagonal.
    pub fn kind(self) -> Option<MoveKind> {
        let dr = (self.to.row as i16 - self.from.row as i16).abs();
        let dc = (self.to.col as i16 - self.from.col as i16).abs();
        match (dr, dc) {
            (1, 1) => Some(MoveKind::Simple),
            (2, 2) => Some(MoveKind::Jump),
            _ => None,
        }
    }

    /// The midpoint square a jump captures. `None` for non-jumps.
    pub fn captured_square(self) -> Option<Position> {
        match self.kind() {
            Some(MoveKind::Jump) => Some(Position::new(
                (self.from.row + self.to.row) / 2,
                (self.from.col + self.to.col) / 2,
            )),
            _ => None,
        }
    }
}

/// Why `submit_move` turned a candidate down. Every rejection is local and
/// recoverable: the board is untouched and the same player retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    NoPieceAtOrigin,
    NotYourPiece,
    DestinationOccupied,
    NotDiagonalAdjacentOrJumpDistance,
    WrongDirectionForMan,
    JumpRequiresCapturablePiece,
    JumpMandatoryButSimpleAttempted,
    MustContinueJumpingFromSamePiece,
    GameOver,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NoPieceAtOrigin => "that square is empty",
            Self::NotYourPiece => "that piece doesn't belong to you",
            Self::DestinationOccupied => "the destination square is occupied",
            Self::NotDiagonalAdjacentOrJumpDistance => {
                "moves must be one or two squares along a diagonal"
            }
            Self::WrongDirectionForMan => "only kings may move backward",
            Self::JumpRequiresCapturablePiece => "no opponent piece to capture",
            Self::JumpMandatoryButSimpleAttempted => "a jump is available and must be taken",
            Self::MustContinueJumpingFromSamePiece => {
                "you must continue jumping with the same piece"
            }
            Self::GameOver => "the game is already over",
        };
        f.write_str(msg)
    }
}

/// Snapshot of the whole game handed to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 row-major cell codes: 0 empty, 1 red man, 2 black man,
    /// 3 red king, 4 black king.
    pub board: Vec<u8>,
    pub current_player: Player,
    pub winner: Option<Player>,
    /// Contract: `true` exactly when the side to move has a jump available.
    pub jump_forced: bool,
    /// Contract:
    /// - mid multi-jump: the square the chain must continue from.
    /// - otherwise `None`.
    pub continue_from: Option<Position>,
    pub red_count: u8,
    pub black_count: u8,
}

/// What a single accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub captured: Option<Position>,
    pub promoted: bool,
    /// `true` when the same player must jump again from the landing square.
    pub turn_continues: bool,
}
