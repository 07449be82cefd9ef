//! Per-frame simulation tick
//!
//! Runs the formation controller, then the combat resolver (which calls into
//! the session controller on player hits), then wave bookkeeping.

use super::combat::{CombatOutcome, resolve_combat};
use super::formation::{FormationStep, update_formation};
use super::session::{check_wave_clear, expire_timers};
use super::state::GameState;
use crate::consts::*;

/// Discrete player commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Input commands for a single tick, applied in order before simulating
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

/// What a tick did (for logging, tests and hosts that react to events)
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub formation: FormationStep,
    pub combat: CombatOutcome,
    /// Ids of bullets fired by the player this tick
    pub shots_fired: Vec<u32>,
    pub wave_cleared: bool,
}

/// Apply one command. Movement is clamped to the playfield; firing is
/// rate-limited by `SHOOT_COOLDOWN`. Returns the new bullet id when a shot
/// is accepted.
pub fn apply_command(state: &mut GameState, command: Command, now: f64) -> Option<u32> {
    if state.game_over {
        return None;
    }

    match command {
        Command::MoveLeft => {
            state.player.move_by(-PLAYER_SPEED);
            None
        }
        Command::MoveRight => {
            state.player.move_by(PLAYER_SPEED);
            None
        }
        Command::Fire => {
            let ready = state
                .last_player_shot
                .is_none_or(|last| now - last >= SHOOT_COOLDOWN);
            if !ready {
                return None;
            }
            state.last_player_shot = Some(now);
            let muzzle = state.player.muzzle();
            Some(state.spawn_bullet(muzzle))
        }
    }
}

/// Advance the game state by one frame. Does nothing once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Option<TickReport> {
    if state.game_over {
        return None;
    }

    state.time_ticks += 1;
    state.now = now;
    expire_timers(state, now);

    let shots_fired = input
        .commands
        .iter()
        .filter_map(|&cmd| apply_command(state, cmd, now))
        .collect();

    let lives_before = state.lives;
    let formation = update_formation(&mut state.formation, now);

    let had_enemies = !state.formation.is_empty();
    let combat = resolve_combat(state, now);
    let wave_cleared = check_wave_clear(state, had_enemies, now);

    debug_assert!(state.lives <= lives_before, "lives increased during a tick");
    debug_assert!(
        lives_before - state.lives <= 1,
        "more than one life lost in a tick"
    );

    Some(TickReport {
        formation,
        combat,
        shots_fired,
        wave_cleared,
    })
}
