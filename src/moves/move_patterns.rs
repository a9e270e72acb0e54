//! Move-pattern provider seam.
//!
//! The state model asks a provider for raw candidate destinations and then
//! applies bounds and friendly-fire filtering itself, so providers never need
//! to know the game mode or whose turn it is.

use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_types::{Coordinate, PieceKind};
use crate::game_state::piece::Piece;
use crate::moves::bishop_moves::bishop_candidates;
use crate::moves::king_moves::king_candidates;
use crate::moves::knight_moves::knight_candidates;
use crate::moves::pawn_moves::pawn_candidates;
use crate::moves::queen_moves::queen_candidates;
use crate::moves::rook_moves::rook_candidates;

pub trait MovePatternProvider: Send + Sync {
    /// Unfiltered destinations for `piece` standing on `origin` in `layout`.
    fn candidate_destinations(
        &self,
        piece: &Piece,
        origin: Coordinate,
        layout: &BoardLayout,
    ) -> Vec<Coordinate>;
}

/// Orthodox chess geometry without castling, en passant or promotion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMovePatterns;

impl MovePatternProvider for StandardMovePatterns {
    fn candidate_destinations(
        &self,
        piece: &Piece,
        origin: Coordinate,
        layout: &BoardLayout,
    ) -> Vec<Coordinate> {
        match piece.kind {
            PieceKind::Pawn => pawn_candidates(piece.owner, origin, layout),
            PieceKind::Knight => knight_candidates(origin),
            PieceKind::Bishop => bishop_candidates(origin, layout),
            PieceKind::Rook => rook_candidates(origin, layout),
            PieceKind::Queen => queen_candidates(origin, layout),
            PieceKind::King => king_candidates(origin),
        }
    }
}
