//! Property tests over random input sequences and frame timings

use std::collections::HashSet;

use cosmic_invaders::consts::*;
use cosmic_invaders::sim::{Command, Formation, GameState, Snapshot, TickInput, restart, tick};
use proptest::prelude::*;

/// One frame: optional command plus the time elapsed since the previous frame
fn frame_strategy() -> impl Strategy<Value = (Option<Command>, u32)> {
    let command = prop_oneof![
        Just(None),
        Just(Some(Command::MoveLeft)),
        Just(Some(Command::MoveRight)),
        Just(Some(Command::Fire)),
    ];
    (command, 1u32..120)
}

fn run_frames(
    state: &mut GameState,
    frames: &[(Option<Command>, u32)],
    mut check: impl FnMut(&GameState, &GameState, &cosmic_invaders::sim::TickReport),
) {
    let mut now = 0.0;
    for &(command, dt) in frames {
        now += dt as f64;
        let before = state.clone();
        let input = TickInput::new(command);
        match tick(state, &input, now) {
            Some(report) => check(&before, state, &report),
            None => break,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enemies_stay_inside_playfield(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..600),
    ) {
        let mut state = GameState::new(seed);
        run_frames(&mut state, &frames, |_, after, _| {
            for enemy in &after.formation.enemies {
                assert!(enemy.pos.x >= 0.0);
                assert!(enemy.pos.x + ENEMY_WIDTH <= GAME_WIDTH);
            }
            assert!(after.player.x >= 0.0);
            assert!(after.player.x + PLAYER_WIDTH <= GAME_WIDTH);
        });
    }

    #[test]
    fn score_grows_by_exact_row_values(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..600),
    ) {
        let mut state = GameState::new(seed);
        run_frames(&mut state, &frames, |before, after, report| {
            let kills = &report.combat.kills;
            let enemies: HashSet<u32> = kills.iter().map(|k| k.enemy_id).collect();
            let bullets: HashSet<u32> = kills.iter().map(|k| k.bullet_id).collect();
            assert_eq!(enemies.len(), kills.len(), "enemy credited twice");
            assert_eq!(bullets.len(), kills.len(), "bullet credited twice");

            let expected: u64 = kills
                .iter()
                .map(|k| {
                    let enemy = before.formation.find(k.enemy_id).expect("killed enemy existed");
                    ENEMY_ROW_POINTS[enemy.row]
                })
                .sum();
            assert_eq!(after.score, before.score + expected);
        });
    }

    #[test]
    fn lives_drop_once_per_unshielded_hit(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..900),
    ) {
        let mut state = GameState::new(seed);
        run_frames(&mut state, &frames, |before, after, report| {
            let hit = report.combat.player_hit_by.is_some();
            if hit {
                assert!(!before.player.is_invulnerable() || before.player.invulnerable_until.is_some_and(|t| after.now >= t));
                assert_eq!(after.lives, before.lives - 1);
                assert_eq!(after.game_over, after.lives == 0);
            } else {
                assert_eq!(after.lives, before.lives);
            }
        });
    }

    #[test]
    fn restart_matches_fresh_session(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..300),
    ) {
        let mut state = GameState::new(seed);
        run_frames(&mut state, &frames, |_, _, _| {});

        restart(&mut state);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.lives, STARTING_LIVES);
        prop_assert!(!state.game_over);
        prop_assert!(state.player_bullets.is_empty());
        prop_assert!(state.enemy_bullets.is_empty());
        prop_assert!(state.explosions.is_empty());
        prop_assert_eq!(&state.formation, &Formation::initial());
        prop_assert_eq!(Snapshot::capture(&state), Snapshot::capture(&GameState::new(seed)));
    }
}

#[test]
fn wave_clear_restores_initial_layout() {
    let mut state = GameState::new(11);
    // Line up a bullet under every enemy
    let targets: Vec<_> = state.formation.enemies.iter().map(|e| e.pos).collect();
    for pos in targets {
        state.spawn_bullet(pos + glam::Vec2::new(10.0, 25.0));
    }

    let report = tick(&mut state, &TickInput::default(), 1.0).unwrap();
    assert_eq!(report.combat.kills.len(), ENEMY_ROWS * ENEMIES_PER_ROW);
    assert!(report.wave_cleared);
    assert_eq!(state.score, (30 + 20 + 10) * ENEMIES_PER_ROW as u64);

    tick(&mut state, &TickInput::default(), 2.0).unwrap();
    assert_eq!(state.formation.enemies, Formation::initial().enemies);
    assert_eq!(state.formation.speed_multiplier, 1.0);
    assert!(state.player_bullets.is_empty());
}
