use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_types::Coordinate;
use crate::moves::rook_moves::trace_ray;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub fn bishop_candidates(origin: Coordinate, layout: &BoardLayout) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(13);
    for (d_col, d_row) in BISHOP_DIRECTIONS {
        trace_ray(origin, d_col, d_row, layout, &mut out);
    }
    out
}
