//! Shared vocabulary types for the chess/chase state model.
//!
//! Sides, piece kinds, game modes, piece identities and grid coordinates are
//! plain `Copy` values so the layouts, players and controllers can pass them
//! around freely without borrowing the state model.

use std::fmt;

pub use crate::game_state::game_state::GameState;

/// Side of the board. `Light` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// One-based controller number used by input devices.
    #[inline]
    pub const fn player_number(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 2,
        }
    }

    /// Back rank this side starts on, also used to seed chase placement.
    #[inline]
    pub const fn home_row(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Row delta of a forward step for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "white",
            Color::Dark => "black",
        }
    }

    pub fn from_player_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Color::Light),
            2 => Some(Color::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Single-letter symbol, uppercase for light and lowercase for dark.
    pub const fn symbol(self, color: Color) -> char {
        let upper = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match color {
            Color::Light => upper,
            Color::Dark => upper.to_ascii_lowercase(),
        }
    }
}

/// Which sub-game is currently being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Normal turn-based play on the full board.
    Chess,
    /// Timed two-piece round triggered by an attempted capture.
    Chase,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Chess => f.write_str("CHESS"),
            GameMode::Chase => f.write_str("CHASE"),
        }
    }
}

/// Stable identity of a piece for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Grid coordinate. Values outside `0..=7` are representable and mean off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub col: i8,
    pub row: i8,
}

impl Coordinate {
    /// Sentinel returned by lookups for a piece that is not on the layout.
    pub const OFF_BOARD: Coordinate = Coordinate { col: -1, row: -1 };

    #[inline]
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.col >= 0 && self.col <= 7 && self.row >= 0 && self.row <= 7
    }

    #[inline]
    pub const fn offset(self, d_col: i8, d_row: i8) -> Self {
        Self {
            col: self.col.saturating_add(d_col),
            row: self.row.saturating_add(d_row),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}
