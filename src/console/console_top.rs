//! Line-oriented console front-end and event loop.
//!
//! A reader thread forwards stdin lines and one timer thread per chase round
//! delivers that round's countdown expiry. Both feed a single channel, so the
//! match is only ever mutated from the loop thread.
//!
//! Commands (players are `1`/`2` or `white`/`black`, squares `e4` or `4,3`):
//! `show`, `status`, `moves <sq>`, `move <from> <to>`, `select <p> <sq>`,
//! `cycle <p> <step>`, `confirm <p>`, `cancel <p>`,
//! `setoption name <Name> value <v>`, `newgame`, `quit`.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::controllers::input_intents::InputIntent;
use crate::controllers::match_controller::{IntentOutcome, MatchController};
use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::chase_types::Color;
use crate::game_state::game_events::GameEvent;
use crate::game_state::game_state::GameState;
use crate::game_state::match_config::MatchConfig;
use crate::utils::grid::{coordinate_to_algebraic, parse_coordinate};
use crate::utils::render_game_state::{render_game_state, status_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Line(String),
    ChaseTimeout(u64),
    InputClosed,
}

pub fn run_stdio_loop(config: MatchConfig) -> io::Result<()> {
    let (event_tx, event_rx) = channel::<ConsoleEvent>();

    let reader_tx = event_tx.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if reader_tx.send(ConsoleEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = reader_tx.send(ConsoleEvent::InputClosed);
    });

    let mut console = ConsoleState::new(config, event_tx).map_err(io::Error::other)?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render_game_state(console.controller.state()))?;

    for event in event_rx {
        let should_quit = console.handle_event(event, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleState {
    controller: MatchController,
    config: MatchConfig,
    timer_tx: Sender<ConsoleEvent>,
}

impl ConsoleState {
    pub fn new(config: MatchConfig, timer_tx: Sender<ConsoleEvent>) -> ChaseResult<Self> {
        let state = GameState::new_match(config.clone())?;
        Ok(Self {
            controller: MatchController::new(state),
            config,
            timer_tx,
        })
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn handle_event(&mut self, event: ConsoleEvent, out: &mut impl Write) -> io::Result<bool> {
        match event {
            ConsoleEvent::Line(line) => self.handle_command(&line, out),
            ConsoleEvent::ChaseTimeout(round) => {
                match self.controller.on_chase_timeout(round) {
                    Ok(Some(_)) => {
                        self.flush_events(out)?;
                        writeln!(out, "{}", render_game_state(self.controller.state()))?;
                    }
                    Ok(None) => debug!("countdown for round {round} already settled"),
                    Err(err) => writeln!(out, "info string timeout error: {err}")?,
                }
                Ok(false)
            }
            ConsoleEvent::InputClosed => Ok(true),
        }
    }

    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let result = match cmd {
            "quit" | "exit" => return Ok(true),
            "show" => {
                writeln!(out, "{}", render_game_state(self.controller.state()))?;
                Ok(())
            }
            "status" => {
                writeln!(out, "{}", status_line(self.controller.state()))?;
                Ok(())
            }
            "newgame" => self.new_game(),
            "setoption" => self.handle_setoption(trimmed),
            "moves" => self.handle_moves(&args, out),
            "move" => self.handle_move(&args, out),
            "select" | "cycle" | "confirm" | "cancel" => self.handle_intent(cmd, &args, out),
            other => Err(ChaseChessError::Parse(other.to_owned())),
        };

        if let Err(err) = result {
            warn!("command `{trimmed}` failed: {err}");
            writeln!(out, "info string {cmd} error: {err}")?;
        }
        self.flush_events(out)?;
        Ok(false)
    }

    fn new_game(&mut self) -> ChaseResult<()> {
        let state = GameState::new_match(self.config.clone())?;
        self.controller = MatchController::new(state);
        Ok(())
    }

    fn handle_setoption(&mut self, line: &str) -> ChaseResult<()> {
        let rest = line
            .strip_prefix("setoption")
            .map(str::trim)
            .and_then(|rest| rest.strip_prefix("name"))
            .ok_or_else(|| ChaseChessError::Parse(line.to_owned()))?;
        let (name, value) = rest
            .split_once(" value ")
            .ok_or_else(|| ChaseChessError::Parse(line.to_owned()))?;

        self.config.set_option(name, value)?;
        self.controller.state_mut().set_option(name, value)
    }

    fn handle_moves(&mut self, args: &[&str], out: &mut impl Write) -> ChaseResult<()> {
        let at = parse_coordinate(args.first().copied().unwrap_or_default())?;
        let state = self.controller.state();
        let piece = state
            .piece_at_grid(at)
            .ok_or(ChaseChessError::EmptySquare(at))?;
        let names: Vec<String> = state
            .legal_destinations_for(piece)?
            .into_iter()
            .filter_map(|c| coordinate_to_algebraic(c).ok())
            .collect();
        write_line(out, &format!("moves {}", names.join(" ")))
    }

    fn handle_move(&mut self, args: &[&str], out: &mut impl Write) -> ChaseResult<()> {
        let [from, to] = args else {
            return Err(ChaseChessError::Parse(args.join(" ")));
        };
        let from = parse_coordinate(from)?;
        let to = parse_coordinate(to)?;

        let piece = self
            .controller
            .state()
            .piece_at_grid(from)
            .ok_or(ChaseChessError::EmptySquare(from))?;
        let outcome = self.controller.play_move(piece, to)?;
        write_line(out, &format!("info string {outcome:?}"))
    }

    fn handle_intent(&mut self, cmd: &str, args: &[&str], out: &mut impl Write) -> ChaseResult<()> {
        let player = parse_player(args.first().copied().unwrap_or_default())?;
        let intent = match cmd {
            "select" => InputIntent::SelectTile {
                player,
                at: parse_coordinate(args.get(1).copied().unwrap_or_default())?,
            },
            "cycle" => InputIntent::CycleMove {
                player,
                step: args
                    .get(1)
                    .map(|raw| raw.parse::<i32>())
                    .unwrap_or(Ok(1))
                    .map_err(|_| ChaseChessError::Parse(args.join(" ")))?,
            },
            "confirm" => InputIntent::ConfirmMove { player },
            _ => InputIntent::Cancel { player },
        };

        match self.controller.handle(intent)? {
            IntentOutcome::Ignored => write_line(out, "info string ignored"),
            IntentOutcome::PieceSelected {
                piece,
                destinations,
            } => {
                let names: Vec<String> = destinations
                    .into_iter()
                    .filter_map(|c| coordinate_to_algebraic(c).ok())
                    .collect();
                write_line(out, &format!("selected {piece} moves {}", names.join(" ")))
            }
            IntentOutcome::CursorMoved(at) => {
                let name = at
                    .and_then(|c| coordinate_to_algebraic(c).ok())
                    .unwrap_or_else(|| "-".to_owned());
                write_line(out, &format!("highlight {name}"))
            }
            IntentOutcome::SelectionCancelled => write_line(out, "info string cancelled"),
            IntentOutcome::Moved(outcome) => write_line(out, &format!("info string {outcome:?}")),
        }
    }

    /// Print queued notifications and arm a timer for any new chase round.
    fn flush_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.controller.state_mut().drain_events() {
            if let GameEvent::ChaseStarted { round, .. } = event {
                self.schedule_timeout(round);
            }
            writeln!(out, "info string event {event:?}")?;
        }
        Ok(())
    }

    fn schedule_timeout(&self, round: u64) {
        let delay = self
            .controller
            .state()
            .config()
            .chase_countdown
            .to_std()
            .unwrap_or(Duration::ZERO);
        let tx = self.timer_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(ConsoleEvent::ChaseTimeout(round));
        });
    }
}

fn parse_player(token: &str) -> ChaseResult<Color> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "white" | "w" => Ok(Color::Light),
        "2" | "black" | "b" => Ok(Color::Dark),
        other => token
            .parse::<u8>()
            .ok()
            .and_then(Color::from_player_number)
            .ok_or_else(|| ChaseChessError::Parse(other.to_owned())),
    }
}

fn write_line(out: &mut impl Write, line: &str) -> ChaseResult<()> {
    writeln!(out, "{line}").map_err(|err| ChaseChessError::Output(err.to_string()))
}
