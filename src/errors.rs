//! Errors used throughout the chase chess rules engine.
//!
//! `ChaseChessError` is the single error type returned by the state model,
//! the selection controllers and the console front-end. Every variant is local
//! and non-retryable: a caller that receives one should re-query the legal
//! state (for example `legal_destinations_for`) instead of repeating the same
//! request.
//!
//! Usage guidelines:
//! - Rejections of player input (`IllegalDestination`, `MatchConcluded`,
//!   `InputNotLive`, `NothingSelected`) are ordinary outcomes and leave the
//!   game untouched.
//! - `PieceNotOnActiveLayout` and `UnknownPiece` indicate an internal
//!   consistency failure; they are logged at error level where they arise.

use thiserror::Error;

use crate::game_state::chase_types::{Color, Coordinate, GameMode, PieceId};

pub type ChaseResult<T> = Result<T, ChaseChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaseChessError {
    /// The destination is not among the piece's legal destinations.
    #[error("piece {piece} cannot move to {destination}")]
    IllegalDestination {
        piece: PieceId,
        destination: Coordinate,
    },

    /// A king has been captured; no further moves are accepted.
    #[error("match concluded")]
    MatchConcluded,

    /// A live piece could not be located on the active layout.
    #[error("piece {0} is not on the active layout")]
    PieceNotOnActiveLayout(PieceId),

    /// A capture or removal targeted an empty square.
    #[error("no piece at {0}")]
    EmptySquare(Coordinate),

    /// A placement targeted a coordinate outside the board.
    #[error("{0} is off the board")]
    OffBoard(Coordinate),

    /// A placement targeted a square that is already taken.
    #[error("square {0} is already occupied")]
    SquareOccupied(Coordinate),

    /// The piece id does not belong to this match.
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    /// The operation requires a different game mode.
    #[error("operation requires {expected} mode but the game is in {actual} mode")]
    WrongMode { expected: GameMode, actual: GameMode },

    /// The piece does not belong to the side attempting to use it.
    #[error("piece {piece} does not belong to {player}")]
    NotOwnPiece { piece: PieceId, player: Color },

    /// The player's controller is not accepting input right now.
    #[error("input from {0} is not live")]
    InputNotLive(Color),

    /// A move was confirmed without a piece or destination selected.
    #[error("{0} has nothing selected")]
    NothingSelected(Color),

    /// A configuration value could not be applied.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing a response failed.
    #[error("output error: {0}")]
    Output(String),

    /// A coordinate or command could not be parsed.
    #[error("could not parse `{0}`")]
    Parse(String),
}
