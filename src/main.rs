use std::process::ExitCode;

use chase_chess::console::console_top::run_stdio_loop;
use chase_chess::game_state::match_config::MatchConfig;

fn main() -> ExitCode {
    env_logger::init();

    let config = match MatchConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run_stdio_loop(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
