//! Discrete input events delivered to the selection controllers.

use crate::game_state::chase_types::{Color, Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    /// Pick the piece on `at` as the piece to move.
    SelectTile { player: Color, at: Coordinate },
    /// Step the highlighted destination forwards or backwards.
    CycleMove { player: Color, step: i32 },
    /// Move the selected piece to the highlighted destination.
    ConfirmMove { player: Color },
    /// Drop the current selection and go back to tile selection.
    Cancel { player: Color },
}

impl InputIntent {
    pub fn player(&self) -> Color {
        match *self {
            InputIntent::SelectTile { player, .. }
            | InputIntent::CycleMove { player, .. }
            | InputIntent::ConfirmMove { player }
            | InputIntent::Cancel { player } => player,
        }
    }
}
