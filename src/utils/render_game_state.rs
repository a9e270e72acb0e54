//! Terminal board renderer for the active layout.

use crate::game_state::chase_types::{Color, Coordinate, GameMode};
use crate::game_state::game_state::GameState;

/// Render the active layout, row 7 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in (0..8).rev() {
        out.push(char::from(b'1' + row as u8));
        out.push(' ');

        for col in 0..8 {
            let symbol = game_state
                .piece_at_grid(Coordinate::new(col, row))
                .and_then(|id| game_state.piece(id).ok())
                .map(|piece| piece.symbol())
                .unwrap_or('.');
            out.push(symbol);

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + row as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str(&status_line(game_state));
    out.push('\n');
    out.push_str(&format!(
        "captured: white {}, black {}",
        game_state.player(Color::Light).captured_count(),
        game_state.player(Color::Dark).captured_count()
    ));

    out
}

/// One-line summary of mode, turn and chase clock.
pub fn status_line(game_state: &GameState) -> String {
    if let Some(winner) = game_state.winner() {
        return format!("game over, {winner} wins");
    }
    match game_state.mode() {
        GameMode::Chess => format!("CHESS, {} to move", game_state.current_color()),
        GameMode::Chase => {
            let remaining_ms = game_state
                .chase_remaining()
                .map(|left| left.num_milliseconds())
                .unwrap_or(0);
            format!(
                "CHASE, {}.{:01}s left",
                remaining_ms / 1000,
                (remaining_ms % 1000) / 100
            )
        }
    }
}
