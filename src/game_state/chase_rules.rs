//! Canonical rule constants.
//!
//! Board geometry, the standard starting array and the default chase
//! countdown. These are fixed by the rules and are not configurable except for
//! the countdown, which `MatchConfig` may override.

use crate::game_state::chase_types::{Color, PieceKind};

/// Width and height of both the chess and the chase layouts.
pub const BOARD_SIZE: usize = 8;

/// Largest valid grid index.
pub const MAX_GRID_INDEX: i8 = (BOARD_SIZE as i8) - 1;

/// Default length of a chase round, in seconds.
pub const DEFAULT_CHASE_COUNTDOWN_SECS: i64 = 10;

/// Chase placement draws a column from `0..CHASE_PLACEMENT_COLUMNS`.
pub const CHASE_PLACEMENT_COLUMNS: i8 = 7;

/// Back-rank order from column 0 to column 7.
pub const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Row the side's pawns start on.
#[inline]
pub const fn pawn_row(color: Color) -> i8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}
