//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps supplied by the caller, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod formation;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use combat::{CombatOutcome, Kill, resolve_combat};
pub use formation::{FormationStep, update_formation};
pub use session::{check_wave_clear, damage_player, expire_timers, restart, restart_with_seed};
pub use snapshot::{BulletView, EnemyView, ExplosionView, PlayerView, Snapshot};
pub use state::{
    Bullet, Direction, Enemy, EnemyBullet, Explosion, Formation, GameState, Player, Tint,
};
pub use tick::{Command, TickInput, TickReport, apply_command, tick};
