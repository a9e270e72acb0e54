use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_types::Coordinate;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::{trace_ray, ROOK_DIRECTIONS};

pub fn queen_candidates(origin: Coordinate, layout: &BoardLayout) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(27);
    for (d_col, d_row) in ROOK_DIRECTIONS.into_iter().chain(BISHOP_DIRECTIONS) {
        trace_ray(origin, d_col, d_row, layout, &mut out);
    }
    out
}
