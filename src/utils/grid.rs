//! Coordinate and grid conversions.
//!
//! Converts between grid coordinates, presentation-space points (tile centres
//! of a unit-spaced board centred on the origin), square indices (`0 == a1`,
//! `63 == h8`) and algebraic names such as `e4`. All functions are pure.

use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::chase_rules::{BOARD_SIZE, MAX_GRID_INDEX};
use crate::game_state::chase_types::Coordinate;

/// Distance from the board centre to the centre of tile 0.
const GRID_OFFSET: f32 = (BOARD_SIZE as f32 - 1.0) / 2.0;

/// Presentation-space position on the board plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub z: f32,
}

#[inline]
pub fn point_from_grid(grid: Coordinate) -> Point {
    Point {
        x: f32::from(grid.col) - GRID_OFFSET,
        z: f32::from(grid.row) - GRID_OFFSET,
    }
}

/// Nearest grid cell to `point`. Points beyond the board map to off-board
/// coordinates.
#[inline]
pub fn grid_from_point(point: Point) -> Coordinate {
    let col = (point.x + GRID_OFFSET).round();
    let row = (point.z + GRID_OFFSET).round();
    Coordinate::new(clamp_to_i8(col), clamp_to_i8(row))
}

fn clamp_to_i8(value: f32) -> i8 {
    value.clamp(f32::from(i8::MIN), f32::from(i8::MAX)) as i8
}

#[inline]
pub fn square_index(grid: Coordinate) -> Option<u8> {
    grid.is_on_board()
        .then(|| (grid.row as u8) * BOARD_SIZE as u8 + grid.col as u8)
}

#[inline]
pub fn coordinate_from_square_index(square: u8) -> ChaseResult<Coordinate> {
    if usize::from(square) >= BOARD_SIZE * BOARD_SIZE {
        return Err(ChaseChessError::Parse(format!("square index {square}")));
    }
    let size = BOARD_SIZE as u8;
    Ok(Coordinate::new((square % size) as i8, (square / size) as i8))
}

/// Parse `e4`-style names.
pub fn algebraic_to_coordinate(square: &str) -> ChaseResult<Coordinate> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(ChaseChessError::Parse(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChaseChessError::Parse(square.to_owned()));
    }

    Ok(Coordinate::new((file - b'a') as i8, (rank - b'1') as i8))
}

pub fn coordinate_to_algebraic(grid: Coordinate) -> ChaseResult<String> {
    if !grid.is_on_board() {
        return Err(ChaseChessError::OffBoard(grid));
    }
    let file_char = char::from(b'a' + grid.col as u8);
    let rank_char = char::from(b'1' + grid.row as u8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Accepts either `e4` or `col,row`.
pub fn parse_coordinate(token: &str) -> ChaseResult<Coordinate> {
    if let Some((col, row)) = token.split_once(',') {
        let col = col
            .trim()
            .parse::<i8>()
            .map_err(|_| ChaseChessError::Parse(token.to_owned()))?;
        let row = row
            .trim()
            .parse::<i8>()
            .map_err(|_| ChaseChessError::Parse(token.to_owned()))?;
        let grid = Coordinate::new(col, row);
        if col > MAX_GRID_INDEX || row > MAX_GRID_INDEX || !grid.is_on_board() {
            return Err(ChaseChessError::OffBoard(grid));
        }
        return Ok(grid);
    }
    algebraic_to_coordinate(token)
}
