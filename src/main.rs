//! Cosmic Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use cosmic_invaders::sim::Command;
    use cosmic_invaders::{Game, Settings};

    // The page draws whatever we hand it
    #[wasm_bindgen(inline_js = "
        export function present_snapshot(json) {
            if (typeof window.presentSnapshot === 'function') {
                window.presentSnapshot(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_snapshot(json: &str);
    }

    /// Game plus the pending animation frame request
    struct Host {
        game: Game,
        frame_handle: Option<i32>,
    }

    thread_local! {
        static HOST: RefCell<Option<Rc<RefCell<Host>>>> = const { RefCell::new(None) };
    }

    /// Called by the renderer when an explosion animation finishes
    #[wasm_bindgen]
    pub fn explosion_complete(id: u32) {
        HOST.with(|host| {
            if let Some(host) = host.borrow().as_ref() {
                host.borrow_mut().game.complete_explosion(id);
            }
        });
    }

    /// Called by the settings panel with the full settings JSON
    #[wasm_bindgen]
    pub fn update_settings(json: &str) {
        let settings = Settings::from_json(json);
        settings.save();
        HOST.with(|host| {
            if let Some(host) = host.borrow().as_ref() {
                host.borrow_mut().game.set_settings(settings);
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cosmic Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            game: Game::new(seed, Settings::load()),
            frame_handle: None,
        }));
        HOST.with(|h| *h.borrow_mut() = Some(host.clone()));

        setup_input_handlers(host.clone());
        setup_restart_button(host.clone());
        setup_teardown(host.clone());
        setup_resume(host.clone());

        // Start game loop
        request_animation_frame(host);

        log::info!("Cosmic Invaders running!");
    }

    fn setup_input_handlers(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = match event.key().as_str() {
                "ArrowLeft" => Some(Command::MoveLeft),
                "ArrowRight" => Some(Command::MoveRight),
                " " => Some(Command::Fire),
                _ => None,
            };
            if let Some(command) = command {
                // Keep arrows/space from scrolling the page
                event.prevent_default();
                host.borrow_mut().game.push_command(command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let loop_host = host.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(loop_host, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => host.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let keep_running = {
            let mut h = host.borrow_mut();
            h.frame_handle = None;

            if let Some(snapshot) = h.game.frame(time) {
                match serde_json::to_string(&snapshot) {
                    Ok(json) => present_snapshot(&json),
                    Err(e) => log::error!("Snapshot serialization failed: {}", e),
                }
            }
            h.game.is_running()
        };

        if keep_running {
            request_animation_frame(host);
        } else {
            log::info!("Game loop stopped");
        }
    }

    fn setup_restart_button(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let needs_frame = host.borrow_mut().game.restart(seed);
                if needs_frame {
                    request_animation_frame(host.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cancel the pending frame when the page goes away
    fn setup_teardown(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let handle = host.borrow_mut().frame_handle.take();
            if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
                log::info!("Pending frame cancelled");
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Restart the loop when the page comes back from the back/forward cache
    fn setup_resume(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let resume = {
                let h = host.borrow();
                h.game.should_resume(h.frame_handle.is_some())
            };
            if resume {
                log::info!("Page restored, resuming game loop");
                request_animation_frame(host.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Invaders (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1979);
    run_headless(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a session with a simple autopilot at 60 fps and print the final snapshot
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) {
    use cosmic_invaders::consts::*;
    use cosmic_invaders::sim::Command;
    use cosmic_invaders::{Game, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let mut game = Game::new(seed, Settings::default());
    let mut frames = 0;
    let mut last = None;

    while game.is_running() && frames < MAX_FRAMES {
        // Chase the lowest enemy and keep shooting
        let state = game.state();
        let ship_center = state.player.x + PLAYER_WIDTH / 2.0;
        let target = state
            .formation
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + ENEMY_WIDTH / 2.0);

        if let Some(target) = target {
            if target < ship_center - PLAYER_SPEED {
                game.push_command(Command::MoveLeft);
            } else if target > ship_center + PLAYER_SPEED {
                game.push_command(Command::MoveRight);
            }
        }
        game.push_command(Command::Fire);

        last = game.frame(frames as f64 * FRAME_MS);
        frames += 1;
    }

    let Some(snapshot) = last else {
        return;
    };
    log::info!(
        "Session ended after {} frames: score {}, wave {}, lives {}",
        frames,
        snapshot.score,
        snapshot.wave,
        snapshot.lives
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}
