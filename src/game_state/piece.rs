//! Piece identity.
//!
//! A piece never stores its own square; the layouts do. What it does carry is
//! the capability to list raw candidate destinations from a given origin,
//! delegated to a `MovePatternProvider`.

use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_types::{Color, Coordinate, PieceId, PieceKind};
use crate::moves::move_patterns::MovePatternProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: Color,
}

impl Piece {
    pub const fn new(id: PieceId, kind: PieceKind, owner: Color) -> Self {
        Self { id, kind, owner }
    }

    /// Unfiltered destinations from `origin`. May contain off-board and
    /// friendly-occupied squares.
    pub fn candidate_destinations(
        &self,
        origin: Coordinate,
        layout: &BoardLayout,
        patterns: &dyn MovePatternProvider,
    ) -> Vec<Coordinate> {
        patterns.candidate_destinations(self, origin, layout)
    }

    #[inline]
    pub fn symbol(&self) -> char {
        self.kind.symbol(self.owner)
    }
}
