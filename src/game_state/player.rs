//! One side of the match: its name, the pieces it still fields and the
//! pieces it has taken from the opponent.

use std::collections::BTreeSet;

use crate::game_state::chase_types::{Color, PieceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub color: Color,
    pieces: BTreeSet<PieceId>,
    captured_pieces: Vec<PieceId>,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Self {
            name: color.name().to_owned(),
            color,
            pieces: BTreeSet::new(),
            captured_pieces: Vec::new(),
        }
    }

    #[inline]
    pub fn player_number(&self) -> u8 {
        self.color.player_number()
    }

    /// True while `piece` is one of this side's live pieces.
    #[inline]
    pub fn owns(&self, piece: PieceId) -> bool {
        self.pieces.contains(&piece)
    }

    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces.iter().copied()
    }

    /// Pieces taken from the opponent, in capture order.
    pub fn captured_pieces(&self) -> &[PieceId] {
        &self.captured_pieces
    }

    pub fn captured_count(&self) -> usize {
        self.captured_pieces.len()
    }

    pub fn live_piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub(crate) fn add_piece(&mut self, piece: PieceId) {
        self.pieces.insert(piece);
    }

    /// Drop `piece` from the live set. Returns false if it was not there.
    pub(crate) fn lose_piece(&mut self, piece: PieceId) -> bool {
        self.pieces.remove(&piece)
    }

    pub(crate) fn record_capture(&mut self, piece: PieceId) {
        self.captured_pieces.push(piece);
    }
}
