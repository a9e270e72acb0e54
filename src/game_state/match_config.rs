//! Match configuration.
//!
//! The chase countdown length is the only tunable rule. The remaining options
//! control how a failed capture attempt hands over the turn and whether chase
//! placement is reproducible.

use chrono::TimeDelta;

use crate::errors::{ChaseChessError, ChaseResult};
use crate::game_state::chase_rules::DEFAULT_CHASE_COUNTDOWN_SECS;

pub const ENV_COUNTDOWN_SECS: &str = "CHASE_CHESS_COUNTDOWN_SECS";
pub const ENV_SEED: &str = "CHASE_CHESS_SEED";
pub const ENV_ALTERNATE_AFTER_ESCAPE: &str = "CHASE_CHESS_ALTERNATE_AFTER_ESCAPE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// How long the attacker has to corner the defender.
    pub chase_countdown: TimeDelta,
    /// Pass the turn when the defender escapes. Off keeps the turn with the
    /// side that attempted the capture.
    pub alternate_turn_after_escape: bool,
    /// Seed for chase placement; `None` draws one from the thread RNG.
    pub rng_seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            chase_countdown: TimeDelta::seconds(DEFAULT_CHASE_COUNTDOWN_SECS),
            alternate_turn_after_escape: false,
            rng_seed: None,
        }
    }
}

impl MatchConfig {
    /// Defaults overridden by any of the `CHASE_CHESS_*` environment variables.
    pub fn from_env() -> ChaseResult<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_COUNTDOWN_SECS) {
            config.set_option("CountdownSecs", &value)?;
        }
        if let Ok(value) = std::env::var(ENV_SEED) {
            config.set_option("Seed", &value)?;
        }
        if let Ok(value) = std::env::var(ENV_ALTERNATE_AFTER_ESCAPE) {
            config.set_option("AlternateAfterEscape", &value)?;
        }
        Ok(config)
    }

    /// Apply a single named option. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChaseResult<()> {
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "countdownsecs" => {
                let secs = value
                    .parse::<i64>()
                    .map_err(|_| ChaseChessError::InvalidConfig(format!("countdown `{value}`")))?;
                if secs <= 0 {
                    return Err(ChaseChessError::InvalidConfig(
                        "countdown must be positive".to_owned(),
                    ));
                }
                self.chase_countdown = TimeDelta::try_seconds(secs).ok_or_else(|| {
                    ChaseChessError::InvalidConfig(format!("countdown `{value}` out of range"))
                })?;
            }
            "seed" => {
                self.rng_seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| ChaseChessError::InvalidConfig(format!("seed `{value}`")))?,
                );
            }
            "alternateafterescape" => {
                self.alternate_turn_after_escape = parse_bool(value)?;
            }
            other => {
                return Err(ChaseChessError::InvalidConfig(format!(
                    "unknown option `{other}`"
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> ChaseResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(ChaseChessError::InvalidConfig(format!("boolean `{value}`"))),
    }
}
