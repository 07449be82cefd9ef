//! Game settings and preferences
//!
//! Persisted in LocalStorage. Settings only shape what the renderer is
//! shown; the simulation itself never reads them.

use serde::{Deserialize, Serialize};

use crate::sim::Snapshot;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Green flash when the player is hit
    pub screen_flash: bool,
    /// Explosion sprites
    pub explosions: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_flash: true,
            explosions: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cosmic_invaders_settings";

    /// Effective screen flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// Strip effects the player has turned off and attach the FPS readout
    pub fn apply(&self, snapshot: &mut Snapshot, fps: u32) {
        snapshot.fps = self.show_fps.then_some(fps);
        if !self.effective_screen_flash() {
            snapshot.screen_flash = false;
        }
        if !self.explosions {
            snapshot.explosions.clear();
        }
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use glam::Vec2;

    fn flashing_snapshot() -> Snapshot {
        let mut state = GameState::new(1);
        state.flash_until = Some(100.0);
        state.spawn_explosion(Vec2::ZERO, 10.0, 0.0);
        Snapshot::capture(&state)
    }

    #[test]
    fn test_defaults_pass_everything_through() {
        let mut snap = flashing_snapshot();
        Settings::default().apply(&mut snap, 60);
        assert_eq!(snap.fps, None);
        assert!(snap.screen_flash);
        assert_eq!(snap.explosions.len(), 1);
    }

    #[test]
    fn test_reduced_motion_hides_flash() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_flash());

        let mut snap = flashing_snapshot();
        settings.apply(&mut snap, 60);
        assert!(!snap.screen_flash);
        assert_eq!(snap.explosions.len(), 1);
    }

    #[test]
    fn test_explosions_toggle() {
        let settings = Settings {
            explosions: false,
            ..Default::default()
        };
        let mut snap = flashing_snapshot();
        settings.apply(&mut snap, 60);
        assert!(snap.explosions.is_empty());
    }

    #[test]
    fn test_show_fps_exposes_readout() {
        let settings = Settings {
            show_fps: true,
            ..Default::default()
        };
        let mut snap = flashing_snapshot();
        settings.apply(&mut snap, 58);
        assert_eq!(snap.fps, Some(58));

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["fps"], 58);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"reducedMotion": true, "show_fps": true}"#);
        // Unknown keys are ignored, missing keys default
        assert!(settings.show_fps);
        assert!(!settings.reduced_motion);
        assert!(settings.screen_flash);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
