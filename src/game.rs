//! Frame loop host
//!
//! Owns the game state and runs exactly one simulation tick per display
//! frame. Input arrives between frames and is queued until the next tick.
//! Once the game is over the loop disarms itself and the host should stop
//! requesting frames; `restart` re-arms it.

use crate::settings::Settings;
use crate::sim::{Command, GameState, Snapshot, TickInput, restart_with_seed, tick};

/// Number of frame timestamps kept for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct Game {
    state: GameState,
    settings: Settings,
    /// Commands received since the last frame
    pending: Vec<Command>,
    /// True while the loop wants frames
    armed: bool,
    /// Host timestamp of the first frame of this session
    epoch: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed),
            settings,
            pending: Vec::new(),
            armed: true,
            epoch: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Whether the host should schedule another frame
    pub fn is_running(&self) -> bool {
        self.armed
    }

    /// Whether a host with no frame in flight must request one to keep the
    /// loop alive, e.g. after the page was restored from the back/forward cache
    pub fn should_resume(&self, frame_pending: bool) -> bool {
        self.armed && !frame_pending
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Queue a command for the next tick. Dropped while the game is over.
    pub fn push_command(&mut self, command: Command) {
        if self.state.game_over {
            return;
        }
        self.pending.push(command);
    }

    /// Run one frame at host time `time` (milliseconds) and publish the result.
    ///
    /// Returns `None` when the loop is disarmed.
    pub fn frame(&mut self, time: f64) -> Option<Snapshot> {
        if !self.armed {
            return None;
        }

        let epoch = *self.epoch.get_or_insert(time);
        let now = time - epoch;

        let input = TickInput {
            commands: std::mem::take(&mut self.pending),
        };
        tick(&mut self.state, &input, now);
        self.track_fps(time);

        if self.state.game_over {
            self.armed = false;
        }

        Some(self.snapshot())
    }

    /// Current state as the renderer should see it
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::capture(&self.state);
        self.settings.apply(&mut snapshot, self.fps);
        snapshot
    }

    /// Renderer finished animating an explosion
    pub fn complete_explosion(&mut self, id: u32) {
        self.state.remove_explosion(id);
    }

    /// Start a fresh session. Returns true if the loop was stopped and the
    /// host must schedule a frame to resume it.
    pub fn restart(&mut self, seed: u64) -> bool {
        restart_with_seed(&mut self.state, seed);
        self.pending.clear();
        self.epoch = None;
        let was_stopped = !self.armed;
        self.armed = true;
        was_stopped
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we'll overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    #[test]
    fn test_clock_starts_at_first_frame() {
        let mut game = Game::new(1, Settings::default());
        game.frame(50_000.0).unwrap();
        assert_eq!(game.state().now, 0.0);
        game.frame(50_016.0).unwrap();
        assert_eq!(game.state().now, 16.0);
    }

    #[test]
    fn test_queued_commands_apply_next_frame() {
        let mut game = Game::new(1, Settings::default());
        game.push_command(Command::MoveLeft);
        game.push_command(Command::Fire);
        assert_eq!(game.state().player.x, 375.0);

        let snap = game.frame(0.0).unwrap();
        assert_eq!(snap.player.x, 375.0 - PLAYER_SPEED);
        assert_eq!(snap.player_bullets.len(), 1);

        // Queue drained
        let snap = game.frame(16.0).unwrap();
        assert_eq!(snap.player.x, 375.0 - PLAYER_SPEED);
        assert_eq!(snap.player_bullets.len(), 1);
    }

    fn kill_player(game: &mut Game) {
        game.state.lives = 1;
        let pos = Vec2::new(game.state.player.x + 10.0, game.state.player.y - 10.0);
        game.state.spawn_enemy_bullet(pos);
    }

    #[test]
    fn test_game_over_disarms_loop() {
        let mut game = Game::new(1, Settings::default());
        game.frame(0.0).unwrap();
        kill_player(&mut game);

        let last = game.frame(16.0).unwrap();
        assert!(last.game_over);
        assert_eq!(last.lives, 0);
        assert!(!game.is_running());
        assert!(game.frame(32.0).is_none());

        game.push_command(Command::Fire);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_restart_rearms_loop() {
        let mut game = Game::new(1, Settings::default());
        game.frame(0.0).unwrap();
        kill_player(&mut game);
        game.frame(16.0).unwrap();
        assert!(!game.is_running());

        assert!(game.restart(2));
        assert!(game.is_running());
        let snap = game.frame(10_000.0).unwrap();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.lives, STARTING_LIVES);
        assert!(!snap.game_over);
        assert_eq!(snap.enemies.len(), ENEMY_ROWS * ENEMIES_PER_ROW);
        assert_eq!(game.state().now, 0.0);

        // Restarting a live game doesn't need a new frame request
        assert!(!game.restart(3));
    }

    #[test]
    fn test_resume_only_when_armed_and_idle() {
        let mut game = Game::new(1, Settings::default());
        assert!(game.should_resume(false));
        assert!(!game.should_resume(true));

        game.frame(0.0).unwrap();
        kill_player(&mut game);
        game.frame(16.0).unwrap();
        // A finished game stays stopped until restart
        assert!(!game.should_resume(false));

        game.restart(2);
        assert!(game.should_resume(false));
    }

    #[test]
    fn test_complete_explosion_prunes_early() {
        let mut game = Game::new(1, Settings::default());
        game.frame(0.0).unwrap();
        let id = game.state.spawn_explosion(Vec2::new(5.0, 5.0), 10.0, 0.0);
        assert_eq!(game.snapshot().explosions.len(), 1);

        game.complete_explosion(id);
        assert!(game.snapshot().explosions.is_empty());
    }

    #[test]
    fn test_settings_filter_snapshot() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut game = Game::new(1, settings);
        game.frame(0.0).unwrap();
        let pos = Vec2::new(game.state.player.x + 10.0, game.state.player.y - 10.0);
        game.state.spawn_enemy_bullet(pos);

        let snap = game.frame(16.0).unwrap();
        assert!(game.state().screen_flashing());
        assert!(!snap.screen_flash);
    }

    #[test]
    fn test_show_fps_publishes_estimate() {
        let mut game = Game::new(1, Settings::default());
        let snap = game.frame(1.0).unwrap();
        assert_eq!(snap.fps, None);

        game.set_settings(Settings {
            show_fps: true,
            ..Default::default()
        });
        let mut last = None;
        for i in 1..120 {
            last = game.frame(1.0 + i as f64 * 1000.0 / 60.0);
        }
        let snap = last.unwrap();
        assert_eq!(snap.fps, Some(game.fps()));
        assert!((59..=61).contains(&snap.fps.unwrap()));
        assert!(game.settings().show_fps);
    }

    #[test]
    fn test_fps_estimate() {
        let mut game = Game::new(1, Settings::default());
        for i in 0..120 {
            game.frame(1.0 + i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&game.fps()));
    }
}
