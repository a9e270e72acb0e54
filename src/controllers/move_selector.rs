//! Second stage of a player's input: choosing a destination for the selected
//! piece from its legal destinations.

use crate::errors::ChaseResult;
use crate::game_state::chase_types::{Color, Coordinate, PieceId};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSelector {
    player: Color,
    enabled: bool,
    moving_piece: Option<PieceId>,
    move_locations: Vec<Coordinate>,
    index: usize,
}

impl MoveSelector {
    pub fn new(player: Color) -> Self {
        Self {
            player,
            enabled: false,
            moving_piece: None,
            move_locations: Vec::new(),
            index: 0,
        }
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn moving_piece(&self) -> Option<PieceId> {
        self.moving_piece
    }

    pub fn move_locations(&self) -> &[Coordinate] {
        &self.move_locations
    }

    /// Destinations that currently hold a piece, i.e. capture attempts in
    /// CHESS mode and chase-ending moves in CHASE mode.
    pub fn attack_locations(&self, state: &GameState) -> Vec<Coordinate> {
        self.move_locations
            .iter()
            .copied()
            .filter(|at| state.piece_at_grid(*at).is_some())
            .collect()
    }

    /// Start choosing a destination for `piece`.
    pub fn enter_state(&mut self, state: &GameState, piece: PieceId) -> ChaseResult<()> {
        self.move_locations = state.legal_destinations_for(piece)?;
        self.moving_piece = Some(piece);
        self.index = 0;
        self.enabled = true;
        Ok(())
    }

    pub fn exit_state(&mut self) {
        self.enabled = false;
        self.moving_piece = None;
        self.move_locations.clear();
        self.index = 0;
    }

    pub fn highlighted(&self) -> Option<Coordinate> {
        self.move_locations.get(self.index).copied()
    }

    /// Step the highlight, wrapping at either end.
    pub fn cycle(&mut self, step: i32) -> Option<Coordinate> {
        if self.move_locations.is_empty() {
            return None;
        }
        let len = self.move_locations.len() as i64;
        self.index = (self.index as i64 + i64::from(step)).rem_euclid(len) as usize;
        self.highlighted()
    }
}
