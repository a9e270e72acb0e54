//! Routes player input to the state model.
//!
//! `MatchController` owns the `GameState` together with one tile selector and
//! one move selector per player. Input from a player is live when it is their
//! turn, or for both players while a chase round runs. After every state
//! change the controller re-enters the selectors the way the round requires:
//! a plain chess move hands selection to the opponent, a chase step returns
//! the mover to tile selection, and entering or leaving a chase resets both
//! players.

use log::debug;

use crate::controllers::input_intents::InputIntent;
use crate::controllers::move_selector::MoveSelector;
use crate::controllers::tile_selector::TileSelector;
use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::chase_types::{Color, Coordinate, GameMode, PieceId};
use crate::game_state::game_state::{ChaseResolution, GameState, MoveOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerController {
    pub tile: TileSelector,
    pub moves: MoveSelector,
}

impl PlayerController {
    pub fn new(player: Color) -> Self {
        Self {
            tile: TileSelector::new(player),
            moves: MoveSelector::new(player),
        }
    }

    fn return_to_select(&mut self) {
        self.moves.exit_state();
        self.tile.enter_state();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The input had no effect (for example selecting an empty square).
    Ignored,
    PieceSelected {
        piece: PieceId,
        destinations: Vec<Coordinate>,
    },
    CursorMoved(Option<Coordinate>),
    SelectionCancelled,
    Moved(MoveOutcome),
}

#[derive(Debug)]
pub struct MatchController {
    state: GameState,
    controllers: [PlayerController; 2],
}

impl MatchController {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            controllers: [
                PlayerController::new(Color::Light),
                PlayerController::new(Color::Dark),
            ],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn controller(&self, player: Color) -> &PlayerController {
        &self.controllers[player.index()]
    }

    /// Whether `player` may act right now.
    pub fn is_input_live(&self, player: Color) -> bool {
        !self.state.is_game_over()
            && (player == self.state.current_color() || self.state.mode() == GameMode::Chase)
    }

    /// Apply an elapsed chase countdown, if any.
    pub fn tick(&mut self) -> ChaseResult<Option<ChaseResolution>> {
        let resolution = self.state.poll_chase_timeout()?;
        if resolution.is_some() {
            self.reset_all();
        }
        Ok(resolution)
    }

    /// Scheduled countdown callback for `round`.
    pub fn on_chase_timeout(&mut self, round: u64) -> ChaseResult<Option<ChaseResolution>> {
        let resolution = self.state.fire_chase_timeout(round)?;
        if resolution.is_some() {
            self.reset_all();
        }
        Ok(resolution)
    }

    pub fn handle(&mut self, intent: InputIntent) -> ChaseResult<IntentOutcome> {
        self.tick()?;

        let player = intent.player();
        if self.state.is_game_over() {
            return Err(ChaseChessError::MatchConcluded);
        }
        if !self.is_input_live(player) {
            return Err(ChaseChessError::InputNotLive(player));
        }

        match intent {
            InputIntent::SelectTile { at, .. } => self.select_tile(player, at),
            InputIntent::CycleMove { step, .. } => {
                let moves = &mut self.controllers[player.index()].moves;
                if !moves.is_enabled() {
                    return Err(ChaseChessError::NothingSelected(player));
                }
                Ok(IntentOutcome::CursorMoved(moves.cycle(step)))
            }
            InputIntent::ConfirmMove { .. } => self.confirm_move(player),
            InputIntent::Cancel { .. } => {
                self.state.deselect_piece(player);
                self.controllers[player.index()].return_to_select();
                Ok(IntentOutcome::SelectionCancelled)
            }
        }
    }

    fn select_tile(&mut self, player: Color, at: Coordinate) -> ChaseResult<IntentOutcome> {
        let controller = &mut self.controllers[player.index()];
        if controller.moves.is_enabled() {
            controller.return_to_select();
        }

        let Some(piece) = controller.tile.select_at(&mut self.state, at)? else {
            return Ok(IntentOutcome::Ignored);
        };
        if let Err(err) = controller.moves.enter_state(&self.state, piece) {
            self.state.deselect_piece(player);
            controller.return_to_select();
            return Err(err);
        }

        Ok(IntentOutcome::PieceSelected {
            piece,
            destinations: controller.moves.move_locations().to_vec(),
        })
    }

    fn confirm_move(&mut self, player: Color) -> ChaseResult<IntentOutcome> {
        let moves = &self.controllers[player.index()].moves;
        let (Some(piece), Some(destination)) = (moves.moving_piece(), moves.highlighted()) else {
            return Err(ChaseChessError::NothingSelected(player));
        };

        let outcome = self.state.request_move(piece, destination)?;
        debug!("{player} confirmed {piece} -> {destination}: {outcome:?}");
        self.route_outcome(player, outcome);

        Ok(IntentOutcome::Moved(outcome))
    }

    /// Move `piece` directly, bypassing tile and move selection. The owner
    /// must be live, exactly as for intents. A move that arrives after the
    /// chase countdown ran out settles the round and is rejected.
    pub fn play_move(&mut self, piece: PieceId, destination: Coordinate) -> ChaseResult<MoveOutcome> {
        if let Some(resolution) = self.tick()? {
            debug!("dropping move of {piece}, chase round {} already timed out", resolution.round);
            return Err(ChaseChessError::WrongMode {
                expected: GameMode::Chase,
                actual: self.state.mode(),
            });
        }
        let player = self.state.piece(piece)?.owner;
        if self.state.is_game_over() {
            return Err(ChaseChessError::MatchConcluded);
        }
        if !self.is_input_live(player) {
            return Err(ChaseChessError::InputNotLive(player));
        }

        self.state.select_piece(player, piece)?;
        let outcome = match self.state.request_move(piece, destination) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state.deselect_piece(player);
                return Err(err);
            }
        };
        self.route_outcome(player, outcome);
        Ok(outcome)
    }

    fn route_outcome(&mut self, player: Color, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Relocated { .. } if self.state.mode() == GameMode::Chess => {
                self.controllers[player.index()].moves.exit_state();
                self.controllers[player.index()].tile.exit_state();
                self.controllers[player.opposite().index()].return_to_select();
            }
            MoveOutcome::Relocated { .. } => {
                self.state.deselect_piece(player);
                self.controllers[player.index()].return_to_select();
            }
            MoveOutcome::ChaseStarted { .. } | MoveOutcome::ChaseResolved(_) => self.reset_all(),
        }
    }

    fn reset_all(&mut self) {
        for controller in &mut self.controllers {
            controller.return_to_select();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntentOutcome, MatchController};
    use crate::controllers::input_intents::InputIntent;
    use crate::errors::ChaseChessError;
    use crate::game_state::board_layout::BoardLayout;
    use crate::game_state::chase_clock::ManualClock;
    use crate::game_state::chase_types::{Color, Coordinate, GameMode, PieceKind};
    use crate::game_state::game_events::ChaseWinner;
    use crate::game_state::game_state::{GameState, MoveOutcome};
    use crate::game_state::match_config::MatchConfig;
    use crate::game_state::piece::Piece;
    use crate::moves::move_patterns::{MovePatternProvider, StandardMovePatterns};
    use chrono::TimeDelta;

    /// Pieces may only step one square east or west, or land on any occupied
    /// square.
    struct SidestepPatterns;

    impl MovePatternProvider for SidestepPatterns {
        fn candidate_destinations(
            &self,
            _piece: &Piece,
            origin: Coordinate,
            layout: &BoardLayout,
        ) -> Vec<Coordinate> {
            let mut out = vec![origin.offset(1, 0), origin.offset(-1, 0)];
            out.extend(
                layout
                    .iter_occupied()
                    .map(|(at, _)| at)
                    .filter(|at| *at != origin),
            );
            out
        }
    }

    fn config() -> MatchConfig {
        MatchConfig {
            rng_seed: Some(11),
            ..MatchConfig::default()
        }
    }

    fn standard(clock: &ManualClock) -> MatchController {
        let mut state = GameState::with_collaborators(
            config(),
            Box::new(clock.clone()),
            Box::new(StandardMovePatterns),
        );
        state.initialize_match().expect("opening array");
        MatchController::new(state)
    }

    fn select(ctrl: &mut MatchController, player: Color, col: i8, row: i8) -> IntentOutcome {
        ctrl.handle(InputIntent::SelectTile {
            player,
            at: Coordinate::new(col, row),
        })
        .expect("selection accepted")
    }

    fn confirm_to(ctrl: &mut MatchController, player: Color, target: Coordinate) -> MoveOutcome {
        let locations = ctrl.controller(player).moves.move_locations().to_vec();
        let index = locations
            .iter()
            .position(|at| *at == target)
            .expect("target is a legal destination");
        ctrl.handle(InputIntent::CycleMove {
            player,
            step: index as i32,
        })
        .expect("cycling accepted");
        match ctrl
            .handle(InputIntent::ConfirmMove { player })
            .expect("confirm accepted")
        {
            IntentOutcome::Moved(outcome) => outcome,
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn only_the_current_player_is_live_in_chess() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);

        assert!(ctrl.is_input_live(Color::Light));
        assert!(!ctrl.is_input_live(Color::Dark));
        assert!(ctrl.controller(Color::Light).tile.is_enabled());
        assert!(!ctrl.controller(Color::Dark).tile.is_enabled());
        assert_eq!(
            ctrl.handle(InputIntent::SelectTile {
                player: Color::Dark,
                at: Coordinate::new(4, 6),
            }),
            Err(ChaseChessError::InputNotLive(Color::Dark))
        );
    }

    #[test]
    fn plain_move_hands_selection_to_the_opponent() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);

        let IntentOutcome::PieceSelected { destinations, .. } = select(&mut ctrl, Color::Light, 4, 1)
        else {
            panic!("pawn should be selectable");
        };
        assert_eq!(destinations, vec![Coordinate::new(4, 2), Coordinate::new(4, 3)]);

        let outcome = confirm_to(&mut ctrl, Color::Light, Coordinate::new(4, 3));
        assert!(matches!(outcome, MoveOutcome::Relocated { .. }));
        assert_eq!(ctrl.state().current_color(), Color::Dark);
        assert!(ctrl.controller(Color::Dark).tile.is_enabled());
        assert!(!ctrl.controller(Color::Light).moves.is_enabled());
        assert!(ctrl.is_input_live(Color::Dark));
        assert!(!ctrl.is_input_live(Color::Light));
    }

    #[test]
    fn selecting_an_opponent_piece_is_ignored() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);
        assert_eq!(select(&mut ctrl, Color::Light, 0, 7), IntentOutcome::Ignored);
        assert!(ctrl.controller(Color::Light).tile.is_enabled());
    }

    #[test]
    fn cancel_returns_to_tile_selection() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);
        select(&mut ctrl, Color::Light, 6, 0);
        assert!(ctrl.controller(Color::Light).moves.is_enabled());

        assert_eq!(
            ctrl.handle(InputIntent::Cancel {
                player: Color::Light
            }),
            Ok(IntentOutcome::SelectionCancelled)
        );
        assert!(ctrl.controller(Color::Light).tile.is_enabled());
        assert!(!ctrl.controller(Color::Light).moves.is_enabled());
        assert_eq!(ctrl.state().selected_piece(Color::Light), None);
        assert_eq!(
            ctrl.handle(InputIntent::ConfirmMove {
                player: Color::Light
            }),
            Err(ChaseChessError::NothingSelected(Color::Light))
        );
    }

    #[test]
    fn chase_opens_input_for_both_players_until_timeout() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);

        select(&mut ctrl, Color::Light, 4, 1);
        confirm_to(&mut ctrl, Color::Light, Coordinate::new(4, 3));
        select(&mut ctrl, Color::Dark, 3, 6);
        confirm_to(&mut ctrl, Color::Dark, Coordinate::new(3, 4));
        select(&mut ctrl, Color::Light, 0, 1);
        confirm_to(&mut ctrl, Color::Light, Coordinate::new(0, 2));

        select(&mut ctrl, Color::Dark, 3, 4);
        let outcome = confirm_to(&mut ctrl, Color::Dark, Coordinate::new(4, 3));
        assert!(matches!(outcome, MoveOutcome::ChaseStarted { .. }));
        assert_eq!(ctrl.state().mode(), GameMode::Chase);
        assert!(ctrl.is_input_live(Color::Light));
        assert!(ctrl.is_input_live(Color::Dark));
        assert!(ctrl.controller(Color::Light).tile.is_enabled());
        assert!(ctrl.controller(Color::Dark).tile.is_enabled());

        let defender = ctrl.state().defender().expect("chase running");
        let defender_square = ctrl.state().grid_for_piece(defender);
        let IntentOutcome::PieceSelected { piece, .. } =
            select(&mut ctrl, Color::Light, defender_square.col, defender_square.row)
        else {
            panic!("defender should be selectable during the chase");
        };
        assert_eq!(piece, defender);

        clock.advance(TimeDelta::seconds(10));
        let resolution = ctrl
            .tick()
            .expect("timeout resolves")
            .expect("countdown elapsed");
        assert_eq!(resolution.winner, ChaseWinner::Defender);
        assert_eq!(ctrl.state().mode(), GameMode::Chess);
        assert!(!ctrl.controller(Color::Light).moves.is_enabled());
        assert!(!ctrl.is_input_live(Color::Light));
        assert!(ctrl.is_input_live(Color::Dark));
        assert_eq!(ctrl.state().grid_for_piece(defender), Coordinate::new(4, 3));
    }

    #[test]
    fn attacker_capture_through_intents_passes_the_turn() {
        let clock = ManualClock::new();
        let mut state = GameState::with_collaborators(
            config(),
            Box::new(clock.clone()),
            Box::new(SidestepPatterns),
        );
        let rook = state
            .add_piece(PieceKind::Rook, Color::Light, Coordinate::new(2, 2))
            .expect("placement");
        let pawn = state
            .add_piece(PieceKind::Pawn, Color::Dark, Coordinate::new(2, 5))
            .expect("placement");
        let mut ctrl = MatchController::new(state);

        select(&mut ctrl, Color::Light, 2, 2);
        let outcome = confirm_to(&mut ctrl, Color::Light, Coordinate::new(2, 5));
        let MoveOutcome::ChaseStarted { round, .. } = outcome else {
            panic!("expected a chase, got {outcome:?}");
        };

        let target = ctrl.state().grid_for_piece(pawn);
        let start = ctrl.state().grid_for_piece(rook);
        select(&mut ctrl, Color::Light, start.col, start.row);
        let outcome = confirm_to(&mut ctrl, Color::Light, target);
        let MoveOutcome::ChaseResolved(resolution) = outcome else {
            panic!("expected the chase to end, got {outcome:?}");
        };

        assert_eq!(resolution.winner, ChaseWinner::Attacker);
        assert_eq!(ctrl.state().piece_at_grid(Coordinate::new(2, 5)), Some(rook));
        assert_eq!(ctrl.state().current_color(), Color::Dark);
        assert_eq!(ctrl.on_chase_timeout(round), Ok(None));
        assert_eq!(ctrl.state().live_piece_count(Color::Dark), 0);
    }

    #[test]
    fn play_move_respects_turn_and_routes_selectors() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);
        let black_pawn = ctrl
            .state()
            .piece_at_grid(Coordinate::new(4, 6))
            .expect("black pawn");
        assert_eq!(
            ctrl.play_move(black_pawn, Coordinate::new(4, 4)),
            Err(ChaseChessError::InputNotLive(Color::Dark))
        );

        let white_pawn = ctrl
            .state()
            .piece_at_grid(Coordinate::new(4, 1))
            .expect("white pawn");
        assert_eq!(
            ctrl.play_move(white_pawn, Coordinate::new(4, 4)),
            Err(ChaseChessError::IllegalDestination {
                piece: white_pawn,
                destination: Coordinate::new(4, 4),
            })
        );
        assert_eq!(ctrl.state().selected_piece(Color::Light), None);

        let outcome = ctrl
            .play_move(white_pawn, Coordinate::new(4, 3))
            .expect("double step");
        assert!(matches!(outcome, MoveOutcome::Relocated { .. }));
        assert!(ctrl.controller(Color::Dark).tile.is_enabled());
        assert!(ctrl.is_input_live(Color::Dark));
    }

    #[test]
    fn play_move_after_chase_timeout_is_rejected() {
        let clock = ManualClock::new();
        let mut ctrl = standard(&clock);
        let e2 = ctrl.state().piece_at_grid(Coordinate::new(4, 1)).expect("e2");
        ctrl.play_move(e2, Coordinate::new(4, 3)).expect("e2-e4");
        let d7 = ctrl.state().piece_at_grid(Coordinate::new(3, 6)).expect("d7");
        ctrl.play_move(d7, Coordinate::new(3, 4)).expect("d7-d5");
        let outcome = ctrl.play_move(e2, Coordinate::new(3, 4)).expect("capture attempt");
        assert!(matches!(outcome, MoveOutcome::ChaseStarted { .. }));

        clock.advance(TimeDelta::seconds(11));
        assert_eq!(
            ctrl.play_move(e2, Coordinate::new(4, 4)),
            Err(ChaseChessError::WrongMode {
                expected: GameMode::Chase,
                actual: GameMode::Chess,
            })
        );
        assert_eq!(ctrl.state().grid_for_piece(e2), Coordinate::new(4, 3));
        assert_eq!(ctrl.state().chess_layout().piece_at(Coordinate::new(4, 4)), None);
        assert_eq!(ctrl.state().current_color(), Color::Light);
        assert!(ctrl.controller(Color::Light).tile.is_enabled());
    }

    #[test]
    fn input_after_game_over_is_rejected() {
        let clock = ManualClock::new();
        let mut state = GameState::with_collaborators(
            config(),
            Box::new(clock.clone()),
            Box::new(SidestepPatterns),
        );
        state
            .add_piece(PieceKind::Queen, Color::Light, Coordinate::new(3, 3))
            .expect("placement");
        state
            .add_piece(PieceKind::King, Color::Dark, Coordinate::new(3, 6))
            .expect("placement");
        let mut ctrl = MatchController::new(state);

        select(&mut ctrl, Color::Light, 3, 3);
        confirm_to(&mut ctrl, Color::Light, Coordinate::new(3, 6));
        ctrl.state_mut()
            .resolve_chase(
                ChaseWinner::Attacker,
                crate::game_state::game_events::ChaseEndReason::Cornered,
            )
            .expect("chase running");

        assert!(ctrl.state().is_game_over());
        assert!(!ctrl.is_input_live(Color::Light));
        assert_eq!(
            ctrl.handle(InputIntent::SelectTile {
                player: Color::Light,
                at: Coordinate::new(3, 6),
            }),
            Err(ChaseChessError::MatchConcluded)
        );
    }
}
