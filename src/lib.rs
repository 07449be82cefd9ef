//! Cosmic Invaders - A Space Invaders style arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, combat, session, tick)
//! - `game`: Frame loop host that drives the simulation once per display frame
//! - `settings`: Player preferences applied to the published snapshot
//!
//! Rendering is external: the host page consumes [`sim::Snapshot`] each frame.

pub mod game;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal step per move command
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Ship sits 10px above the bottom edge
    pub const PLAYER_Y: f32 = GAME_HEIGHT - PLAYER_HEIGHT - 10.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Enemy grid
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_ROWS: usize = 3;
    pub const ENEMIES_PER_ROW: usize = 8;
    pub const ENEMY_SPACING_X: f32 = 60.0;
    pub const ENEMY_SPACING_Y: f32 = 50.0;
    pub const ENEMY_START_Y: f32 = 70.0;

    /// Formation movement
    pub const ENEMY_MOVE_SPEED: f32 = 1.0;
    /// Horizontal shift per formation step
    pub const ENEMY_STEP: f32 = ENEMY_MOVE_SPEED * 10.0;
    pub const ENEMY_DROP_AMOUNT: f32 = 20.0;
    /// Milliseconds between formation steps at 1x speed
    pub const INITIAL_ENEMY_MOVE_INTERVAL: f64 = 500.0;
    /// Multiplier applied on every edge bounce
    pub const BOUNCE_SPEEDUP: f32 = 1.75;
    /// Multiplier applied on every kill
    pub const KILL_SPEEDUP: f32 = 1.01;
    /// Shared ceiling for both speedups
    pub const MAX_SPEED_MULTIPLIER: f32 = 5.0;

    /// Projectiles
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 20.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;

    /// Timers (milliseconds)
    pub const SHOOT_COOLDOWN: f64 = 300.0;
    pub const ENEMY_SHOOT_INTERVAL: f64 = 1000.0;
    pub const EXPLOSION_DURATION: f64 = 300.0;
    pub const PLAYER_INVULNERABILITY_DURATION: f64 = 2000.0;
    pub const SCREEN_FLASH_DURATION: f64 = 200.0;

    /// Explosion radius relative to the destroyed entity's width
    pub const ENEMY_EXPLOSION_SCALE: f32 = 1.2;
    pub const PLAYER_EXPLOSION_SCALE: f32 = 1.5;

    /// Points per enemy row (row 0 is the top row)
    pub const ENEMY_ROW_POINTS: [u64; ENEMY_ROWS] = [30, 20, 10];
}

/// Top-left corner of the enemy at `(row, col)` in a fresh formation
#[inline]
pub fn formation_slot(row: usize, col: usize) -> Vec2 {
    use consts::*;
    let left_margin = (GAME_WIDTH - ENEMIES_PER_ROW as f32 * ENEMY_SPACING_X) / 2.0;
    Vec2::new(
        col as f32 * ENEMY_SPACING_X + left_margin,
        row as f32 * ENEMY_SPACING_Y + ENEMY_START_Y,
    )
}

/// Points awarded for destroying an enemy in `row`
#[inline]
pub fn row_points(row: usize) -> u64 {
    consts::ENEMY_ROW_POINTS[row % consts::ENEMY_ROWS]
}
