//! King candidate destinations: the eight neighbouring squares.

use crate::game_state::chase_types::Coordinate;

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
pub fn king_candidates(origin: Coordinate) -> Vec<Coordinate> {
    KING_STEPS
        .iter()
        .map(|&(d_col, d_row)| origin.offset(d_col, d_row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::king_candidates;
    use crate::game_state::chase_types::Coordinate;

    #[test]
    fn king_from_a1_has_three_on_board_targets() {
        let moves = king_candidates(Coordinate::new(0, 0));
        assert_eq!(moves.iter().filter(|c| c.is_on_board()).count(), 3);
    }
}
