//! Formation controller
//!
//! Steps the enemy group sideways on a timer. When any enemy would leave the
//! playfield the whole group drops, reverses and speeds up instead.

use super::state::Formation;
use crate::consts::*;

/// What the formation did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    /// Not due yet
    Idle,
    /// Shifted sideways by one step
    Moved,
    /// Hit an edge: dropped, reversed and sped up
    Bounced,
}

/// True if stepping in the current direction would push any enemy out of bounds
pub fn would_hit_edge(formation: &Formation) -> bool {
    let dx = ENEMY_STEP * formation.direction.sign();
    formation.enemies.iter().any(|enemy| {
        let x = enemy.pos.x + dx;
        x < 0.0 || x + ENEMY_WIDTH > GAME_WIDTH
    })
}

/// Advance the formation if its move interval has elapsed
pub fn update_formation(formation: &mut Formation, now: f64) -> FormationStep {
    if formation.is_empty() {
        return FormationStep::Idle;
    }
    if now - formation.last_move_time <= formation.move_interval() {
        return FormationStep::Idle;
    }
    formation.last_move_time = now;

    let step = if would_hit_edge(formation) {
        formation.direction = formation.direction.flipped();
        formation.speed_up(BOUNCE_SPEEDUP);
        for enemy in &mut formation.enemies {
            enemy.pos.y += ENEMY_DROP_AMOUNT;
        }
        log::debug!(
            "Formation bounced, heading {:?} at {:.2}x",
            formation.direction,
            formation.speed_multiplier
        );
        FormationStep::Bounced
    } else {
        let dx = ENEMY_STEP * formation.direction.sign();
        for enemy in &mut formation.enemies {
            enemy.pos.x += dx;
        }
        FormationStep::Moved
    };

    let heading = formation.direction;
    for enemy in &mut formation.enemies {
        enemy.direction = heading;
    }

    debug_assert!(
        formation
            .enemies
            .iter()
            .all(|e| e.pos.x >= 0.0 && e.pos.x <= GAME_WIDTH - ENEMY_WIDTH),
        "enemy left the playfield"
    );

    step
}
