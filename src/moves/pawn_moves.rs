//! Pawn candidate destinations.
//!
//! Pawns step forward onto empty squares only (two steps from their starting
//! row when both squares are empty) and reach the forward diagonals only when
//! something stands there. Ownership is left to the state model.

use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_rules::pawn_row;
use crate::game_state::chase_types::{Color, Coordinate};

pub fn pawn_candidates(color: Color, origin: Coordinate, layout: &BoardLayout) -> Vec<Coordinate> {
    let forward = color.forward();
    let mut out = Vec::with_capacity(4);

    let one_step = origin.offset(0, forward);
    if !layout.is_occupied(one_step) {
        out.push(one_step);

        let two_step = one_step.offset(0, forward);
        if origin.row == pawn_row(color) && !layout.is_occupied(two_step) {
            out.push(two_step);
        }
    }

    for d_col in [1, -1] {
        let diagonal = origin.offset(d_col, forward);
        if layout.is_occupied(diagonal) {
            out.push(diagonal);
        }
    }

    out
}
