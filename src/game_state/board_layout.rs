//! 8x8 piece index used by both the chess board and the chase board.
//!
//! A layout does not own pieces; each cell holds the `PieceId` of whatever
//! occupies it. Off-board coordinates read as empty and are rejected on write.

use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::chase_rules::BOARD_SIZE;
use crate::game_state::chase_types::{Coordinate, PieceId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    cells: [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupant of `at`, or `None` for empty and off-board cells.
    #[inline]
    pub fn piece_at(&self, at: Coordinate) -> Option<PieceId> {
        if !at.is_on_board() {
            return None;
        }
        self.cells[at.col as usize][at.row as usize]
    }

    #[inline]
    pub fn is_occupied(&self, at: Coordinate) -> bool {
        self.piece_at(at).is_some()
    }

    /// Put `piece` on `at`, returning whatever was there before.
    pub fn place(&mut self, piece: PieceId, at: Coordinate) -> ChaseResult<Option<PieceId>> {
        let cell = self.cell_mut(piece, at)?;
        Ok(cell.replace(piece))
    }

    /// Empty `at`, returning its previous occupant.
    pub fn take(&mut self, at: Coordinate) -> Option<PieceId> {
        if !at.is_on_board() {
            return None;
        }
        self.cells[at.col as usize][at.row as usize].take()
    }

    /// Move `piece` from wherever it stands to `to`, clearing its origin.
    /// Returns the piece that previously occupied `to`, if any.
    pub fn relocate(&mut self, piece: PieceId, to: Coordinate) -> ChaseResult<Option<PieceId>> {
        if !to.is_on_board() {
            return Err(ChaseChessError::IllegalDestination {
                piece,
                destination: to,
            });
        }
        let from = self
            .locate(piece)
            .ok_or(ChaseChessError::PieceNotOnActiveLayout(piece))?;
        self.take(from);
        self.place(piece, to)
    }

    /// Coordinate of `piece`, scanning column-major like the grid is stored.
    pub fn locate(&self, piece: PieceId) -> Option<Coordinate> {
        self.iter_occupied()
            .find(|(_, occupant)| *occupant == piece)
            .map(|(at, _)| at)
    }

    pub fn occupied_count(&self) -> usize {
        self.iter_occupied().count()
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = (Coordinate, PieceId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(col, column)| {
            column.iter().enumerate().filter_map(move |(row, cell)| {
                cell.map(|piece| (Coordinate::new(col as i8, row as i8), piece))
            })
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn cell_mut(&mut self, piece: PieceId, at: Coordinate) -> ChaseResult<&mut Option<PieceId>> {
        if !at.is_on_board() {
            return Err(ChaseChessError::IllegalDestination {
                piece,
                destination: at,
            });
        }
        Ok(&mut self.cells[at.col as usize][at.row as usize])
    }
}
