//! Game state and core simulation types
//!
//! Every collection the tick mutates lives here, owned by [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use crate::consts::*;
use crate::formation_slot;

/// Horizontal heading shared by the whole formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Color hint handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Red,
    Blue,
    Green,
}

impl Tint {
    /// Row colors, top to bottom
    pub fn for_row(row: usize) -> Self {
        match row % ENEMY_ROWS {
            0 => Tint::Red,
            1 => Tint::Blue,
            _ => Tint::Green,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hits are ignored until this timestamp
    pub invulnerable_until: Option<f64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: PLAYER_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            invulnerable_until: None,
        }
    }
}

impl Player {
    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_until.is_some()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), self.width, self.height)
    }

    /// Shift horizontally, clamped to the playfield
    pub fn move_by(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, GAME_WIDTH - self.width);
    }

    /// Where a freshly fired bullet appears (centered, just above the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.x + self.width / 2.0 - BULLET_WIDTH / 2.0,
            self.y - BULLET_HEIGHT,
        )
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Grid row, determines color and point value
    pub row: usize,
    /// Mirrors the formation heading after every step
    pub direction: Direction,
    pub tint: Tint,
    /// Starting sprite animation frame
    pub initial_frame: u8,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn points(&self) -> u64 {
        crate::row_points(self.row)
    }

    /// Where this enemy's bullet appears (centered, just below it)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + ENEMY_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y + ENEMY_HEIGHT,
        )
    }
}

/// The enemy group: moves in lockstep with a shared heading and speed
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// Live enemies (ordered by id)
    pub enemies: Vec<Enemy>,
    pub direction: Direction,
    /// Grows on bounce and on kill, capped at `MAX_SPEED_MULTIPLIER`
    pub speed_multiplier: f32,
    /// Timestamp of the last step or bounce
    pub last_move_time: f64,
}

impl Default for Formation {
    fn default() -> Self {
        Self::initial()
    }
}

impl Formation {
    /// Full 3x8 grid at the starting layout, 1x speed, heading right
    pub fn initial() -> Self {
        let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMIES_PER_ROW);
        let mut id = 0;
        for row in 0..ENEMY_ROWS {
            // Middle row starts out of phase so the grid doesn't animate in unison
            let initial_frame = if row == 1 { 1 } else { 0 };
            for col in 0..ENEMIES_PER_ROW {
                enemies.push(Enemy {
                    id,
                    pos: formation_slot(row, col),
                    row,
                    direction: Direction::Right,
                    tint: Tint::for_row(row),
                    initial_frame,
                });
                id += 1;
            }
        }

        Self {
            enemies,
            direction: Direction::Right,
            speed_multiplier: 1.0,
            last_move_time: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Milliseconds between steps at the current speed
    pub fn move_interval(&self) -> f64 {
        INITIAL_ENEMY_MOVE_INTERVAL / self.speed_multiplier as f64
    }

    /// Multiply the speed, clamped to the shared ceiling
    pub fn speed_up(&mut self, factor: f32) {
        self.speed_multiplier = (self.speed_multiplier * factor).min(MAX_SPEED_MULTIPLIER);
    }

    pub fn find(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}

/// A projectile fired by the player (travels up)
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// A projectile fired by an enemy (travels down)
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec2,
    pub tint: Tint,
}

impl EnemyBullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// Visual-only blast left behind by a kill or a player hit
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub id: u32,
    /// Center of the blast
    pub pos: Vec2,
    pub size: f32,
    /// Pruned once the clock passes this
    pub expires_at: f64,
}

/// Monotonic id source for one entity collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdCounter {
    next: u32,
}

impl IdCounter {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Enemy fire RNG
    pub rng: Pcg32,
    /// Score
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Terminal; no further ticks are processed
    pub game_over: bool,
    /// Wave number (1-based, informational)
    pub wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the most recent tick
    pub now: f64,
    /// Screen flash is shown until this timestamp
    pub flash_until: Option<f64>,
    /// Player ship
    pub player: Player,
    /// Enemy group
    pub formation: Formation,
    /// Player projectiles (ordered by id)
    pub player_bullets: Vec<Bullet>,
    /// Enemy projectiles (ordered by id)
    pub enemy_bullets: Vec<EnemyBullet>,
    /// Active explosions (ordered by id)
    pub explosions: Vec<Explosion>,
    /// Last accepted player shot
    pub last_player_shot: Option<f64>,
    /// Last enemy shot
    pub last_enemy_shot: f64,
    bullet_ids: IdCounter,
    enemy_bullet_ids: IdCounter,
    explosion_ids: IdCounter,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            game_over: false,
            wave: 1,
            time_ticks: 0,
            now: 0.0,
            flash_until: None,
            player: Player::default(),
            formation: Formation::initial(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            explosions: Vec::new(),
            last_player_shot: None,
            last_enemy_shot: 0.0,
            bullet_ids: IdCounter::default(),
            enemy_bullet_ids: IdCounter::default(),
            explosion_ids: IdCounter::default(),
        }
    }

    #[inline]
    pub fn screen_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    /// Spawn a player bullet at `pos`
    pub fn spawn_bullet(&mut self, pos: Vec2) -> u32 {
        let id = self.bullet_ids.next_id();
        self.player_bullets.push(Bullet { id, pos });
        id
    }

    /// Spawn an enemy bullet at `pos`
    pub fn spawn_enemy_bullet(&mut self, pos: Vec2) -> u32 {
        let id = self.enemy_bullet_ids.next_id();
        self.enemy_bullets.push(EnemyBullet {
            id,
            pos,
            tint: Tint::Red,
        });
        id
    }

    /// Spawn an explosion centered at `pos` that lives for `EXPLOSION_DURATION`
    pub fn spawn_explosion(&mut self, pos: Vec2, size: f32, now: f64) -> u32 {
        let id = self.explosion_ids.next_id();
        self.explosions.push(Explosion {
            id,
            pos,
            size,
            expires_at: now + EXPLOSION_DURATION,
        });
        id
    }

    /// Drop an explosion before it expires (renderer finished its animation)
    pub fn remove_explosion(&mut self, id: u32) -> bool {
        let before = self.explosions.len();
        self.explosions.retain(|e| e.id != id);
        self.explosions.len() != before
    }
}
