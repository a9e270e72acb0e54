//! Rook candidate destinations and the shared ray tracer used by bishops and
//! queens.

use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_rules::MAX_GRID_INDEX;
use crate::game_state::chase_types::Coordinate;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub fn rook_candidates(origin: Coordinate, layout: &BoardLayout) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(14);
    for (d_col, d_row) in ROOK_DIRECTIONS {
        trace_ray(origin, d_col, d_row, layout, &mut out);
    }
    out
}

/// Walk up to seven steps along `(d_col, d_row)`, stopping after the first
/// occupied square. Steps that leave the board are still emitted.
pub(crate) fn trace_ray(
    origin: Coordinate,
    d_col: i8,
    d_row: i8,
    layout: &BoardLayout,
    out: &mut Vec<Coordinate>,
) {
    let mut target = origin;
    for _ in 0..MAX_GRID_INDEX {
        target = target.offset(d_col, d_row);
        out.push(target);
        if layout.is_occupied(target) {
            break;
        }
    }
}
