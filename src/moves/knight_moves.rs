use crate::game_state::chase_types::Coordinate;

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[inline]
pub fn knight_candidates(origin: Coordinate) -> Vec<Coordinate> {
    KNIGHT_JUMPS
        .iter()
        .map(|&(d_col, d_row)| origin.offset(d_col, d_row))
        .collect()
}
