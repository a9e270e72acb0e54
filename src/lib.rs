//! Crate root module declarations for the chase chess rules engine.
//!
//! Exposes the state model (layouts, players, chase rounds and their
//! countdown), the move-pattern providers, the per-player selection
//! controllers, the console front-end and small grid/rendering helpers.

pub mod errors;

pub mod game_state {
    pub mod board_layout;
    pub mod chase_clock;
    pub mod chase_rules;
    pub mod chase_types;
    pub mod game_events;
    pub mod game_state;
    pub mod match_config;
    pub mod piece;
    pub mod player;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_patterns;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod controllers {
    pub mod input_intents;
    pub mod match_controller;
    pub mod move_selector;
    pub mod tile_selector;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod grid;
    pub mod render_game_state;
}
