//! Session controller: lives, invulnerability, waves and restart

use glam::Vec2;

use super::state::{Formation, GameState};
use crate::consts::*;

/// Clear flags whose expiry timestamp has passed and prune dead explosions
pub fn expire_timers(state: &mut GameState, now: f64) {
    if state.player.invulnerable_until.is_some_and(|until| now >= until) {
        state.player.invulnerable_until = None;
    }
    if state.flash_until.is_some_and(|until| now >= until) {
        state.flash_until = None;
    }
    state.explosions.retain(|e| now <= e.expires_at);
}

/// Player took a hit: explode, lose a life, then either end the game or
/// grant a short invulnerability window with a screen flash.
///
/// Hits on an invulnerable player are ignored.
pub fn damage_player(state: &mut GameState, now: f64) {
    if state.player.is_invulnerable() || state.game_over {
        return;
    }

    let center = player_center(state);
    state.spawn_explosion(center, PLAYER_WIDTH * PLAYER_EXPLOSION_SCALE, now);

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.game_over = true;
        log::info!("Game over - final score {} (wave {})", state.score, state.wave);
        return;
    }

    state.player.invulnerable_until = Some(now + PLAYER_INVULNERABILITY_DURATION);
    state.flash_until = Some(now + SCREEN_FLASH_DURATION);
    log::debug!("Player hit, {} lives left", state.lives);
}

/// Start a fresh wave if this tick destroyed the last enemy.
///
/// Returns true when a new wave was spawned.
pub fn check_wave_clear(state: &mut GameState, had_enemies: bool, now: f64) -> bool {
    if !had_enemies || !state.formation.is_empty() {
        return false;
    }

    // Step timer restarts so the new grid holds its starting layout for a beat
    state.formation = Formation {
        last_move_time: now,
        ..Formation::initial()
    };
    state.player_bullets.clear();
    state.enemy_bullets.clear();
    state.explosions.clear();
    state.wave += 1;

    log::info!("Wave cleared! Starting wave {} (score {})", state.wave, state.score);
    true
}

/// Reset everything to a brand new session with the same seed
pub fn restart(state: &mut GameState) {
    restart_with_seed(state, state.seed);
}

/// Reset everything to a brand new session
pub fn restart_with_seed(state: &mut GameState, seed: u64) {
    *state = GameState::new(seed);
    log::info!("Game restarted with seed: {}", seed);
}

/// Where the player's ship is centered (for hit explosions)
pub fn player_center(state: &GameState) -> Vec2 {
    state.player.bounds().center()
}
