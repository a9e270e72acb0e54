//! First stage of a player's input: choosing which of their pieces to move.

use log::debug;

use crate::errors::ChaseResult;
use crate::game_state::chase_rules::BOARD_SIZE;
use crate::game_state::chase_types::{Color, Coordinate, PieceId};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelector {
    player: Color,
    enabled: bool,
    cursor: Coordinate,
    starting_point: Coordinate,
}

impl TileSelector {
    /// White moves first, so only the light selector starts enabled.
    pub fn new(player: Color) -> Self {
        let starting_point = Coordinate::new(0, player.home_row());
        Self {
            player,
            enabled: player == Color::Light,
            cursor: starting_point,
            starting_point,
        }
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    /// Resume accepting tile selections from the starting point.
    pub fn enter_state(&mut self) {
        self.enabled = true;
        self.cursor = self.starting_point;
    }

    pub fn exit_state(&mut self) {
        self.enabled = false;
    }

    /// Nudge the cursor, wrapping around the board edges.
    pub fn move_cursor(&mut self, d_col: i8, d_row: i8) -> Coordinate {
        let size = BOARD_SIZE as i16;
        let col = (i16::from(self.cursor.col) + i16::from(d_col)).rem_euclid(size);
        let row = (i16::from(self.cursor.row) + i16::from(d_row)).rem_euclid(size);
        self.cursor = Coordinate::new(col as i8, row as i8);
        self.cursor
    }

    /// Select the piece on `at` if it belongs to this player. Returns `None`
    /// and stays enabled when the square is empty or holds an opposing piece.
    pub fn select_at(&mut self, state: &mut GameState, at: Coordinate) -> ChaseResult<Option<PieceId>> {
        self.cursor = at;
        let Some(piece) = state.piece_at_grid(at) else {
            return Ok(None);
        };
        if !state.does_piece_belong_to_player(piece, self.player) {
            debug!("{} cannot pick up {piece} on {at}", self.player);
            return Ok(None);
        }

        state.select_piece(self.player, piece)?;
        self.exit_state();
        Ok(Some(piece))
    }
}
