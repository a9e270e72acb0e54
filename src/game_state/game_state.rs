//! Authoritative match state.
//!
//! `GameState` owns every piece, both players, the persistent chess layout and,
//! while a chase round is running, the transient chase layout. The active
//! layout is derived from `Phase`: the chase layout only exists inside
//! `Phase::Chase`, so queries can never read a layout that disagrees with the
//! mode.
//!
//! All mutation goes through `&mut self` methods. Each one validates before
//! touching anything, so a rejected request leaves the state exactly as it was.
//! The chase countdown is a deadline checked at every mutating entry point and
//! by `poll_chase_timeout`; hosts that prefer a scheduled callback hand the
//! round number back through `fire_chase_timeout`.

use std::fmt;

use chrono::TimeDelta;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::board_layout::BoardLayout;
use crate::game_state::chase_clock::{ChaseClock, ChaseCountdown, SystemClock};
use crate::game_state::chase_rules::{pawn_row, BACK_RANK, BOARD_SIZE, CHASE_PLACEMENT_COLUMNS};
use crate::game_state::chase_types::{Color, Coordinate, GameMode, PieceId, PieceKind};
use crate::game_state::game_events::{ChaseEndReason, ChaseWinner, GameEvent};
use crate::game_state::match_config::MatchConfig;
use crate::game_state::piece::Piece;
use crate::game_state::player::Player;
use crate::moves::move_patterns::{MovePatternProvider, StandardMovePatterns};

/// Bookkeeping for one running chase round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaseRound {
    pub round: u64,
    pub layout: BoardLayout,
    pub attacker: PieceId,
    pub defender: PieceId,
    /// Attacker's chess square before the round.
    pub chase_origin: Coordinate,
    /// Defender's chess square before the round; the attacker lands here on a win.
    pub survival_origin: Coordinate,
    pub attacker_start: Coordinate,
    pub defender_start: Coordinate,
    pub countdown: ChaseCountdown,
}

impl ChaseRound {
    /// True if `piece` is one of the two pieces in this round.
    #[inline]
    pub fn involves(&self, piece: PieceId) -> bool {
        piece == self.attacker || piece == self.defender
    }
}

/// Tagged union over the two layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Chess,
    Chase(ChaseRound),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Plain relocation onto an empty square.
    Relocated {
        piece: PieceId,
        from: Coordinate,
        to: Coordinate,
    },
    /// An attempted capture opened a chase round.
    ChaseStarted {
        round: u64,
        attacker: PieceId,
        defender: PieceId,
    },
    /// A chase move landed on the opposing piece and ended the round.
    ChaseResolved(ChaseResolution),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseResolution {
    pub round: u64,
    pub winner: ChaseWinner,
    pub reason: ChaseEndReason,
    pub captured: Option<PieceId>,
    pub game_over: bool,
}

pub struct GameState {
    config: MatchConfig,
    chess_layout: BoardLayout,
    phase: Phase,
    pieces: Vec<Piece>,
    players: [Player; 2],
    current: Color,
    is_game_over: bool,
    winner: Option<Color>,
    selected: [Option<PieceId>; 2],
    rounds_started: u64,
    rng: StdRng,
    clock: Box<dyn ChaseClock>,
    patterns: Box<dyn MovePatternProvider>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Empty board on the wall clock with orthodox move patterns.
    pub fn new(config: MatchConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(SystemClock),
            Box::new(StandardMovePatterns),
        )
    }

    pub fn with_collaborators(
        config: MatchConfig,
        clock: Box<dyn ChaseClock>,
        patterns: Box<dyn MovePatternProvider>,
    ) -> Self {
        let seed = config.rng_seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            chess_layout: BoardLayout::new(),
            phase: Phase::Chess,
            pieces: Vec::with_capacity(BOARD_SIZE * 4),
            players: [Player::new(Color::Light), Player::new(Color::Dark)],
            current: Color::Light,
            is_game_over: false,
            winner: None,
            selected: [None; 2],
            rounds_started: 0,
            rng: StdRng::seed_from_u64(seed),
            clock,
            patterns,
            events: Vec::new(),
        }
    }

    /// Standard starting array, white to move.
    pub fn new_match(config: MatchConfig) -> ChaseResult<Self> {
        let mut state = Self::new(config);
        state.initialize_match()?;
        Ok(state)
    }

    /// Reset to the standard opening array: mode CHESS, white to move.
    pub fn initialize_match(&mut self) -> ChaseResult<()> {
        self.clear_board();

        for color in [Color::Light, Color::Dark] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                self.add_piece(*kind, color, Coordinate::new(col as i8, color.home_row()))?;
            }
            for col in 0..BOARD_SIZE as i8 {
                self.add_piece(PieceKind::Pawn, color, Coordinate::new(col, pawn_row(color)))?;
            }
        }

        info!("match initialized with {} pieces", self.pieces.len());
        Ok(())
    }

    /// Remove every piece and reset turn and mode. Use with `add_piece` to set
    /// up arbitrary positions.
    pub fn clear_board(&mut self) {
        self.chess_layout.clear();
        self.phase = Phase::Chess;
        self.pieces.clear();
        self.players = [Player::new(Color::Light), Player::new(Color::Dark)];
        self.current = Color::Light;
        self.is_game_over = false;
        self.winner = None;
        self.selected = [None; 2];
        self.events.clear();
    }

    /// Put a new piece on the chess layout.
    pub fn add_piece(&mut self, kind: PieceKind, owner: Color, at: Coordinate) -> ChaseResult<PieceId> {
        self.require_mode(GameMode::Chess)?;
        if !at.is_on_board() {
            return Err(ChaseChessError::OffBoard(at));
        }
        if self.chess_layout.is_occupied(at) {
            return Err(ChaseChessError::SquareOccupied(at));
        }

        let id = PieceId(self.pieces.len());
        self.chess_layout.place(id, at)?;
        self.pieces.push(Piece::new(id, kind, owner));
        self.players[owner.index()].add_piece(id);
        Ok(id)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Applies from the next chase round onwards.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChaseResult<()> {
        let mut next = self.config.clone();
        next.set_option(name, value)?;
        if next.rng_seed != self.config.rng_seed {
            if let Some(seed) = next.rng_seed {
                self.rng = StdRng::seed_from_u64(seed);
            }
        }
        self.config = next;
        Ok(())
    }

    pub fn mode(&self) -> GameMode {
        match self.phase {
            Phase::Chess => GameMode::Chess,
            Phase::Chase(_) => GameMode::Chase,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn chase_round(&self) -> Option<&ChaseRound> {
        match &self.phase {
            Phase::Chess => None,
            Phase::Chase(round) => Some(round),
        }
    }

    pub fn attacker(&self) -> Option<PieceId> {
        self.chase_round().map(|round| round.attacker)
    }

    pub fn defender(&self) -> Option<PieceId> {
        self.chase_round().map(|round| round.defender)
    }

    /// The layout queries and moves operate on.
    pub fn active_layout(&self) -> &BoardLayout {
        match &self.phase {
            Phase::Chess => &self.chess_layout,
            Phase::Chase(round) => &round.layout,
        }
    }

    fn active_layout_mut(&mut self) -> &mut BoardLayout {
        match &mut self.phase {
            Phase::Chess => &mut self.chess_layout,
            Phase::Chase(round) => &mut round.layout,
        }
    }

    pub fn chess_layout(&self) -> &BoardLayout {
        &self.chess_layout
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn current_color(&self) -> Color {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current.index()]
    }

    pub fn other_player(&self) -> &Player {
        &self.players[self.current.opposite().index()]
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn piece(&self, id: PieceId) -> ChaseResult<&Piece> {
        self.pieces.get(id.0).ok_or(ChaseChessError::UnknownPiece(id))
    }

    pub fn live_piece_count(&self, color: Color) -> usize {
        self.players[color.index()].live_piece_count()
    }

    /// Occupant of `at` on the active layout; `None` for empty or off-board.
    pub fn piece_at_grid(&self, at: Coordinate) -> Option<PieceId> {
        self.active_layout().piece_at(at)
    }

    /// Location of `piece` on the active layout, or `Coordinate::OFF_BOARD`.
    pub fn grid_for_piece(&self, piece: PieceId) -> Coordinate {
        self.try_grid_for_piece(piece)
            .unwrap_or(Coordinate::OFF_BOARD)
    }

    pub fn try_grid_for_piece(&self, piece: PieceId) -> ChaseResult<Coordinate> {
        self.active_layout().locate(piece).ok_or_else(|| {
            error!("piece {piece} missing from the {} layout", self.mode());
            ChaseChessError::PieceNotOnActiveLayout(piece)
        })
    }

    /// True if `at` holds a piece owned by `color`.
    pub fn friendly_piece_at(&self, at: Coordinate, color: Color) -> bool {
        self.piece_at_grid(at)
            .and_then(|id| self.pieces.get(id.0))
            .is_some_and(|piece| piece.owner == color)
    }

    pub fn does_piece_belong_to_player(&self, piece: PieceId, color: Color) -> bool {
        self.players[color.index()].owns(piece)
    }

    pub fn does_piece_belong_to_current_player(&self, piece: PieceId) -> bool {
        self.does_piece_belong_to_player(piece, self.current)
    }

    /// Candidate destinations of `piece` with off-board squares removed and,
    /// in CHESS mode only, squares held by the piece's own side removed.
    pub fn legal_destinations_for(&self, piece: PieceId) -> ChaseResult<Vec<Coordinate>> {
        let moving = *self.piece(piece)?;
        let origin = self.try_grid_for_piece(piece)?;
        let layout = self.active_layout();

        let mut locations = moving.candidate_destinations(origin, layout, self.patterns.as_ref());
        locations.retain(|tile| tile.is_on_board());
        if self.mode() == GameMode::Chess {
            locations.retain(|tile| !self.friendly_piece_at(*tile, moving.owner));
        }

        Ok(locations)
    }

    /// Move `piece` to `destination`. Onto an empty square this is a plain
    /// relocation. Onto an opposing piece it opens a chase round in CHESS mode
    /// and ends the round in CHASE mode.
    ///
    /// A request that arrives after the chase countdown has run out settles
    /// the round as a timeout and is then rejected: it was aimed at the chase
    /// layout and is never replayed on the chess layout.
    pub fn request_move(&mut self, piece: PieceId, destination: Coordinate) -> ChaseResult<MoveOutcome> {
        if let Some(resolution) = self.poll_chase_timeout()? {
            warn!(
                "move of {piece} to {destination} arrived after chase round {} timed out",
                resolution.round
            );
            return Err(ChaseChessError::WrongMode {
                expected: GameMode::Chase,
                actual: self.mode(),
            });
        }
        self.require_live()?;

        let moving = *self.piece(piece)?;
        if self.mode() == GameMode::Chess && moving.owner != self.current {
            warn!("{} tried to move {piece} out of turn", moving.owner);
            return Err(ChaseChessError::NotOwnPiece {
                piece,
                player: self.current,
            });
        }
        if self.chase_round().is_some_and(|round| !round.involves(piece)) {
            warn!("{piece} is not part of the running chase");
            return Err(ChaseChessError::PieceNotOnActiveLayout(piece));
        }

        let legal = self.legal_destinations_for(piece)?;
        if !legal.contains(&destination) {
            warn!("rejected move of {piece} to {destination}");
            return Err(ChaseChessError::IllegalDestination { piece, destination });
        }

        let occupant = match self.piece_at_grid(destination) {
            None => return self.relocate(piece, destination),
            Some(occupant) => *self.piece(occupant)?,
        };
        if occupant.owner == moving.owner {
            return Err(ChaseChessError::IllegalDestination { piece, destination });
        }

        match self.attacker() {
            None => self.begin_chase(piece, occupant.id),
            Some(attacker) => {
                let (winner, reason) = if piece == attacker {
                    (ChaseWinner::Attacker, ChaseEndReason::Cornered)
                } else {
                    (ChaseWinner::Defender, ChaseEndReason::Escaped)
                };
                self.resolve_chase(winner, reason)
                    .map(MoveOutcome::ChaseResolved)
            }
        }
    }

    fn relocate(&mut self, piece: PieceId, destination: Coordinate) -> ChaseResult<MoveOutcome> {
        let mode = self.mode();
        let from = self.try_grid_for_piece(piece)?;
        self.active_layout_mut().relocate(piece, destination)?;
        self.events.push(GameEvent::PieceRelocated {
            piece,
            to: destination,
            mode,
        });
        debug!("{mode}: {piece} {from} -> {destination}");

        if mode == GameMode::Chess {
            self.clear_selection(self.current);
            self.next_player();
        }

        Ok(MoveOutcome::Relocated {
            piece,
            from,
            to: destination,
        })
    }

    /// Open a chase round against `defending_piece` with the current player's
    /// selected piece as attacker.
    pub fn enter_chase(&mut self, defending_piece: PieceId) -> ChaseResult<MoveOutcome> {
        self.require_live()?;
        self.require_mode(GameMode::Chess)?;
        let attacker = self.selected[self.current.index()]
            .ok_or(ChaseChessError::NothingSelected(self.current))?;
        let target = self.try_grid_for_piece(defending_piece)?;
        if !self.legal_destinations_for(attacker)?.contains(&target) {
            warn!("{attacker} cannot reach {defending_piece} on {target}");
            return Err(ChaseChessError::IllegalDestination {
                piece: attacker,
                destination: target,
            });
        }
        self.begin_chase(attacker, defending_piece)
    }

    fn begin_chase(&mut self, attacker: PieceId, defender: PieceId) -> ChaseResult<MoveOutcome> {
        self.require_mode(GameMode::Chess)?;
        let attacking = *self.piece(attacker)?;
        let defending = *self.piece(defender)?;
        if attacking.owner != self.current {
            return Err(ChaseChessError::NotOwnPiece {
                piece: attacker,
                player: self.current,
            });
        }
        if defending.owner == attacking.owner {
            return Err(ChaseChessError::NotOwnPiece {
                piece: defender,
                player: attacking.owner.opposite(),
            });
        }

        let chase_origin = self.try_grid_for_piece(attacker)?;
        let survival_origin = self.try_grid_for_piece(defender)?;

        let attacker_start = self.chase_start_square(attacking.owner);
        let defender_start = self.chase_start_square(defending.owner);
        let mut layout = BoardLayout::new();
        layout.place(attacker, attacker_start)?;
        layout.place(defender, defender_start)?;

        for color in [Color::Light, Color::Dark] {
            self.clear_selection(color);
        }

        self.rounds_started += 1;
        let round = self.rounds_started;
        let countdown = ChaseCountdown::start(round, self.clock.now(), self.config.chase_countdown);
        self.phase = Phase::Chase(ChaseRound {
            round,
            layout,
            attacker,
            defender,
            chase_origin,
            survival_origin,
            attacker_start,
            defender_start,
            countdown,
        });

        self.events.push(GameEvent::ChaseStarted {
            round,
            attacker,
            defender,
        });
        self.events.push(GameEvent::PieceRelocated {
            piece: attacker,
            to: attacker_start,
            mode: GameMode::Chase,
        });
        self.events.push(GameEvent::PieceRelocated {
            piece: defender,
            to: defender_start,
            mode: GameMode::Chase,
        });
        info!(
            "chase round {round}: {attacker} from {chase_origin} attacks {defender} on {survival_origin}, {}s on the clock",
            self.config.chase_countdown.num_seconds()
        );

        Ok(MoveOutcome::ChaseStarted {
            round,
            attacker,
            defender,
        })
    }

    fn chase_start_square(&mut self, color: Color) -> Coordinate {
        let col = self.rng.random_range(0..CHASE_PLACEMENT_COLUMNS);
        Coordinate::new(col, color.home_row())
    }

    /// End the running chase round.
    ///
    /// Attacker wins: the defender is captured and the attacker takes its
    /// chess square, then the turn passes. Defender wins: both pieces keep
    /// their pre-chase chess squares and the turn stays put unless
    /// `alternate_turn_after_escape` is set.
    pub fn resolve_chase(
        &mut self,
        winner: ChaseWinner,
        reason: ChaseEndReason,
    ) -> ChaseResult<ChaseResolution> {
        let (round, attacker, defender, chase_origin, survival_origin) = match &self.phase {
            Phase::Chase(round) => (
                round.round,
                round.attacker,
                round.defender,
                round.chase_origin,
                round.survival_origin,
            ),
            Phase::Chess => {
                return Err(ChaseChessError::WrongMode {
                    expected: GameMode::Chase,
                    actual: GameMode::Chess,
                })
            }
        };

        for (piece, square) in [(attacker, chase_origin), (defender, survival_origin)] {
            if self.chess_layout.piece_at(square) != Some(piece) {
                error!("chess layout lost track of {piece}, expected on {square}");
                return Err(ChaseChessError::PieceNotOnActiveLayout(piece));
            }
        }

        self.phase = Phase::Chess;
        for color in [Color::Light, Color::Dark] {
            self.clear_selection(color);
        }
        self.events.push(GameEvent::ChaseEnded {
            round,
            winner,
            reason,
        });

        let captured = match winner {
            ChaseWinner::Attacker => {
                let captured = self.capture_piece_at(survival_origin)?;
                self.chess_layout.relocate(attacker, survival_origin)?;
                self.events.push(GameEvent::PieceRelocated {
                    piece: attacker,
                    to: survival_origin,
                    mode: GameMode::Chess,
                });
                Some(captured)
            }
            ChaseWinner::Defender => {
                self.chess_layout.relocate(attacker, chase_origin)?;
                self.chess_layout.relocate(defender, survival_origin)?;
                for (piece, to) in [(attacker, chase_origin), (defender, survival_origin)] {
                    self.events.push(GameEvent::PieceRelocated {
                        piece,
                        to,
                        mode: GameMode::Chess,
                    });
                }
                None
            }
        };

        info!("chase round {round} ended: {winner:?} ({reason:?})");

        let passes_turn = match winner {
            ChaseWinner::Attacker => true,
            ChaseWinner::Defender => self.config.alternate_turn_after_escape,
        };
        if passes_turn && !self.is_game_over {
            self.next_player();
        }

        Ok(ChaseResolution {
            round,
            winner,
            reason,
            captured,
            game_over: self.is_game_over,
        })
    }

    /// Resolve the running round as an escape if its countdown has elapsed.
    pub fn poll_chase_timeout(&mut self) -> ChaseResult<Option<ChaseResolution>> {
        let expired = match &self.phase {
            Phase::Chase(round) => round.countdown.is_expired(self.clock.now()),
            Phase::Chess => false,
        };
        if !expired {
            return Ok(None);
        }
        self.resolve_chase(ChaseWinner::Defender, ChaseEndReason::TimedOut)
            .map(Some)
    }

    /// Scheduled-callback form of the countdown. A no-op unless `round` is the
    /// round still running.
    pub fn fire_chase_timeout(&mut self, round: u64) -> ChaseResult<Option<ChaseResolution>> {
        if self.chase_round().map(|running| running.countdown.round) != Some(round) {
            debug!("ignoring stale countdown for chase round {round}");
            return Ok(None);
        }
        self.resolve_chase(ChaseWinner::Defender, ChaseEndReason::TimedOut)
            .map(Some)
    }

    /// Time left in the running round.
    pub fn chase_remaining(&self) -> Option<TimeDelta> {
        self.chase_round()
            .map(|round| round.countdown.remaining(self.clock.now()))
    }

    /// Remove the piece on `at` in the active layout, moving it from its
    /// owner's live set into the opponent's captured set. Capturing a king
    /// ends the match.
    pub fn capture_piece_at(&mut self, at: Coordinate) -> ChaseResult<PieceId> {
        let id = self
            .piece_at_grid(at)
            .ok_or(ChaseChessError::EmptySquare(at))?;
        let captured = *self.piece(id)?;
        let capturer = captured.owner.opposite();

        self.active_layout_mut().take(at);
        self.players[captured.owner.index()].lose_piece(id);
        self.players[capturer.index()].record_capture(id);
        self.events.push(GameEvent::PieceCaptured {
            piece: id,
            by: capturer,
        });

        if captured.kind == PieceKind::King {
            self.is_game_over = true;
            self.winner = Some(capturer);
            self.events.push(GameEvent::GameOver { winner: capturer });
            info!("{capturer} wins!");
        }

        Ok(id)
    }

    /// Hand the turn to the other side.
    pub fn next_player(&mut self) {
        self.current = self.current.opposite();
        self.events.push(GameEvent::TurnPassed { to: self.current });
    }

    /// Mark `piece` as `player`'s selection. In CHESS mode this also clears
    /// the opponent's selection.
    pub fn select_piece(&mut self, player: Color, piece: PieceId) -> ChaseResult<()> {
        self.require_live()?;
        if !self.does_piece_belong_to_player(piece, player) {
            return Err(ChaseChessError::NotOwnPiece { piece, player });
        }
        self.try_grid_for_piece(piece)?;

        if self.mode() == GameMode::Chess {
            self.clear_selection(player.opposite());
        }
        self.clear_selection(player);
        self.selected[player.index()] = Some(piece);
        self.events.push(GameEvent::PieceSelected { player, piece });
        debug!("{player} selected {piece}");
        Ok(())
    }

    pub fn deselect_piece(&mut self, player: Color) {
        self.clear_selection(player);
    }

    pub fn selected_piece(&self, player: Color) -> Option<PieceId> {
        self.selected[player.index()]
    }

    fn clear_selection(&mut self, player: Color) {
        if let Some(piece) = self.selected[player.index()].take() {
            self.events.push(GameEvent::PieceDeselected { player, piece });
        }
    }

    /// Notifications queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    fn require_live(&self) -> ChaseResult<()> {
        if self.is_game_over {
            warn!("request rejected: match concluded");
            return Err(ChaseChessError::MatchConcluded);
        }
        Ok(())
    }

    fn require_mode(&self, expected: GameMode) -> ChaseResult<()> {
        let actual = self.mode();
        if actual != expected {
            return Err(ChaseChessError::WrongMode { expected, actual });
        }
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("mode", &self.mode())
            .field("current", &self.current)
            .field("is_game_over", &self.is_game_over)
            .field("winner", &self.winner)
            .field("pieces", &self.pieces.len())
            .field("phase", &self.phase)
            .finish()
    }
}
