//! Combat resolver
//!
//! Moves projectiles, scores kills, fires enemy shots and detects hits on the
//! player. Detection runs over the whole tick first; removals are applied in
//! one pass afterwards so nothing is credited twice.

use std::collections::HashSet;

use rand::Rng;

use super::session;
use super::state::{Bullet, Enemy, EnemyBullet, GameState, Player};
use crate::consts::*;

/// A player bullet that destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub bullet_id: u32,
    pub enemy_id: u32,
    pub points: u64,
}

/// Everything that happened during one combat pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatOutcome {
    pub kills: Vec<Kill>,
    /// Enemy bullet that struck the player, if any
    pub player_hit_by: Option<u32>,
    /// Id of the enemy bullet spawned this tick
    pub enemy_shot: Option<u32>,
}

/// Move player bullets up, dropping any that reach the top edge
pub fn advance_player_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut() {
        bullet.pos.y -= BULLET_SPEED;
    }
    bullets.retain(|b| b.pos.y > 0.0);
}

/// Move enemy bullets down, dropping any that leave the bottom edge
pub fn advance_enemy_bullets(bullets: &mut Vec<EnemyBullet>) {
    for bullet in bullets.iter_mut() {
        bullet.pos.y += ENEMY_BULLET_SPEED;
    }
    bullets.retain(|b| b.pos.y < GAME_HEIGHT);
}

/// Pair bullets with the enemies they hit. First match wins; each bullet and
/// each enemy appears in at most one pair.
pub fn detect_enemy_hits(bullets: &[Bullet], enemies: &[Enemy]) -> Vec<(u32, u32)> {
    let mut spent_enemies: HashSet<u32> = HashSet::new();
    let mut hits = Vec::new();

    for bullet in bullets {
        let bullet_box = bullet.bounds();
        let target = enemies
            .iter()
            .filter(|e| !spent_enemies.contains(&e.id))
            .find(|e| bullet_box.intersects(&e.bounds()));

        if let Some(enemy) = target {
            spent_enemies.insert(enemy.id);
            hits.push((bullet.id, enemy.id));
        }
    }

    hits
}

/// First enemy bullet overlapping the player, unless the player is shielded
pub fn detect_player_hit(bullets: &[EnemyBullet], player: &Player) -> Option<u32> {
    if player.is_invulnerable() {
        return None;
    }
    let player_box = player.bounds();
    bullets
        .iter()
        .find(|b| b.bounds().intersects(&player_box))
        .map(|b| b.id)
}

/// Pick a shooter uniformly among enemies that survive this tick
pub fn choose_shooter<'a, R: Rng>(
    enemies: &'a [Enemy],
    dead: &HashSet<u32>,
    rng: &mut R,
) -> Option<&'a Enemy> {
    let alive: Vec<&Enemy> = enemies.iter().filter(|e| !dead.contains(&e.id)).collect();
    if alive.is_empty() {
        return None;
    }
    Some(alive[rng.random_range(0..alive.len())])
}

/// Run one combat pass: bullets, kills, enemy fire and player damage
pub fn resolve_combat(state: &mut GameState, now: f64) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let score_before = state.score;

    // --- Player bullets ---
    advance_player_bullets(&mut state.player_bullets);

    let hits = detect_enemy_hits(&state.player_bullets, &state.formation.enemies);
    let mut dead_enemies: HashSet<u32> = HashSet::with_capacity(hits.len());
    let mut spent_bullets: HashSet<u32> = HashSet::with_capacity(hits.len());

    for (bullet_id, enemy_id) in hits {
        let Some(enemy) = state.formation.find(enemy_id) else {
            continue;
        };
        let center = enemy.center();
        let points = enemy.points();

        state.spawn_explosion(center, ENEMY_WIDTH * ENEMY_EXPLOSION_SCALE, now);
        state.score += points;
        state.formation.speed_up(KILL_SPEEDUP);

        dead_enemies.insert(enemy_id);
        spent_bullets.insert(bullet_id);
        outcome.kills.push(Kill {
            bullet_id,
            enemy_id,
            points,
        });
        log::debug!("Enemy {} destroyed (+{})", enemy_id, points);
    }

    // --- Enemy fire ---
    let mut new_shot = None;
    if now - state.last_enemy_shot > ENEMY_SHOOT_INTERVAL {
        if let Some(shooter) = choose_shooter(&state.formation.enemies, &dead_enemies, &mut state.rng) {
            new_shot = Some(shooter.muzzle());
            state.last_enemy_shot = now;
        }
    }

    // --- Enemy bullets ---
    advance_enemy_bullets(&mut state.enemy_bullets);

    if let Some(bullet_id) = detect_player_hit(&state.enemy_bullets, &state.player) {
        session::damage_player(state, now);
        outcome.player_hit_by = Some(bullet_id);
    }

    // --- Apply removals ---
    state.formation.enemies.retain(|e| !dead_enemies.contains(&e.id));
    state.player_bullets.retain(|b| !spent_bullets.contains(&b.id));
    if let Some(hit_id) = outcome.player_hit_by {
        state.enemy_bullets.retain(|b| b.id != hit_id);
    }

    // Fresh shots join after the scan so they don't move until next tick
    if let Some(pos) = new_shot {
        outcome.enemy_shot = Some(state.spawn_enemy_bullet(pos));
    }

    debug_assert!(state.score >= score_before, "score decreased");
    outcome
}
