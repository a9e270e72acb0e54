//! Notifications emitted by the state model for the presentation layer and
//! the selection controllers. The model queues them; hosts drain the queue
//! after each request.

use crate::game_state::chase_types::{Color, Coordinate, GameMode, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseWinner {
    Attacker,
    Defender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseEndReason {
    /// The attacker landed on the defender's chase square.
    Cornered,
    /// The defender landed on the attacker's chase square.
    Escaped,
    /// The countdown ran out.
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PieceSelected { player: Color, piece: PieceId },
    PieceDeselected { player: Color, piece: PieceId },
    /// `piece` now stands on `to` in the layout of `mode`.
    PieceRelocated {
        piece: PieceId,
        to: Coordinate,
        mode: GameMode,
    },
    /// Hide the chess board and show only these two pieces.
    ChaseStarted {
        round: u64,
        attacker: PieceId,
        defender: PieceId,
    },
    /// Chase-only pieces are hidden again and the chess board is shown.
    ChaseEnded {
        round: u64,
        winner: ChaseWinner,
        reason: ChaseEndReason,
    },
    PieceCaptured { piece: PieceId, by: Color },
    TurnPassed { to: Color },
    GameOver { winner: Color },
}
