//! Read-only view of the game handed to the renderer each frame

use serde::Serialize;

use super::state::{Direction, GameState, Tint};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub row: usize,
    pub tint: Tint,
    pub direction: Direction,
    pub initial_frame: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Only enemy bullets carry a color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<Tint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosionView {
    pub id: u32,
    /// Center of the blast
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub expires_at: f64,
    /// Milliseconds left at capture time
    pub remaining_ms: f64,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub explosions: Vec<ExplosionView>,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub game_over: bool,
    pub screen_flash: bool,
    /// Frame rate readout, only present when the player asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl Snapshot {
    /// Project the current state
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            player: PlayerView {
                x: player.x,
                y: player.y,
                width: player.width,
                height: player.height,
                invulnerable: player.is_invulnerable(),
            },
            enemies: state
                .formation
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    row: e.row,
                    tint: e.tint,
                    direction: e.direction,
                    initial_frame: e.initial_frame,
                })
                .collect(),
            player_bullets: state
                .player_bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    tint: None,
                })
                .collect(),
            enemy_bullets: state
                .enemy_bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    tint: Some(b.tint),
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    size: e.size,
                    expires_at: e.expires_at,
                    remaining_ms: (e.expires_at - state.now).max(0.0),
                })
                .collect(),
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            score: state.score,
            lives: state.lives,
            wave: state.wave,
            game_over: state.game_over,
            screen_flash: state.screen_flashing(),
            fps: None,
        }
    }
}
