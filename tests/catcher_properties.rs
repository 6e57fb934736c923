//! Property tests for the catcher loop

use ecosphere_games::catcher::{
    CatcherState, FrameInput, InputFlags, ItemKind, spawn::roll_kind, spawn_item, tick,
};
use ecosphere_games::consts::*;
use ecosphere_games::SeededRandom;
use proptest::prelude::*;

fn frame_input() -> impl Strategy<Value = FrameInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.1)).prop_map(|(left, right, idle_mode)| {
        FrameInput {
            left,
            right,
            idle_mode,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_player_stays_in_bounds(seed in any::<u64>(), inputs in prop::collection::vec(frame_input(), 1..2000)) {
        let mut state = CatcherState::new(seed);
        let mut score = 0;
        for input in &inputs {
            tick(&mut state, input);
            let x = state.player.pos.x;
            prop_assert!((0.0..=PLAY_WIDTH - PLAYER_WIDTH).contains(&x), "x = {}", x);
            prop_assert_eq!(state.player.pos.y, PLAY_HEIGHT - PLAYER_FLOOR_OFFSET);
            prop_assert!(state.score >= score);
            score = state.score;
            for item in &state.items {
                prop_assert!(item.pos.x - item.radius >= 0.0);
                prop_assert!(item.pos.x + item.radius <= PLAY_WIDTH);
                prop_assert!(item.pos.y - item.radius <= PLAY_HEIGHT);
            }
        }
    }

    #[test]
    fn prop_game_over_freezes(seed in any::<u64>(), inputs in prop::collection::vec(frame_input(), 1..200)) {
        let mut state = CatcherState::new(seed);
        let still = FrameInput::default();
        // Standing still under falling stones ends the run eventually
        while !state.is_game_over() && state.frame < 100_000 {
            tick(&mut state, &still);
        }
        prop_assume!(state.is_game_over());
        let view = state.view();
        let frame = state.frame;
        for input in &inputs {
            tick(&mut state, input);
        }
        prop_assert_eq!(state.view(), view);
        prop_assert_eq!(state.frame, frame);
    }

    #[test]
    fn prop_spawn_frequencies(seed in any::<u64>()) {
        let mut rng = SeededRandom::new(seed);
        let mut counts = [0u32; 3];
        const DRAWS: u32 = 10_000;
        for _ in 0..DRAWS {
            match roll_kind(&mut rng) {
                ItemKind::CommonFruit => counts[0] += 1,
                ItemKind::RareFruit => counts[1] += 1,
                ItemKind::Hazard => counts[2] += 1,
            }
        }
        let freq = |n: u32| f64::from(n) / f64::from(DRAWS);
        prop_assert!((freq(counts[0]) - 0.60).abs() < 0.03, "common {:?}", counts);
        prop_assert!((freq(counts[1]) - 0.10).abs() < 0.02, "rare {:?}", counts);
        prop_assert!((freq(counts[2]) - 0.30).abs() < 0.03, "hazard {:?}", counts);
    }

    #[test]
    fn prop_spawned_items_start_above_play_area(seed in any::<u64>(), width in 40.0f32..1000.0) {
        let mut rng = SeededRandom::new(seed);
        for id in 0..200 {
            let item = spawn_item(&mut rng, id, width);
            prop_assert!(item.pos.y + item.radius <= 0.0);
            prop_assert!(item.pos.x >= item.radius);
            prop_assert!(item.pos.x <= width - item.radius + 1e-3);
        }
    }
}

#[test]
fn test_restart_after_hazard_starts_fresh_run() {
    let keys = InputFlags::default();
    let mut state = CatcherState::new(5);
    keys.press(false, state.phase);
    // Hold right until a stone lands on the player
    while !state.is_game_over() && state.frame < 100_000 {
        tick(&mut state, &keys.snapshot().into());
    }
    assert!(state.is_game_over());
    assert!(keys.snapshot().right);

    assert!(state.restart(&keys));
    assert!(!state.is_game_over());
    assert_eq!(state.score, 0);
    assert!(state.items.is_empty());
    assert_eq!(state.player.pos.x, (PLAY_WIDTH - PLAYER_WIDTH) / 2.0);

    // The key held through the loss no longer moves the new run
    let x = state.player.pos.x;
    tick(&mut state, &keys.snapshot().into());
    assert_eq!(state.player.pos.x, x);
}

#[test]
fn test_input_flags_drive_frames() {
    let flags = InputFlags::default();
    let mut state = CatcherState::new(9);
    let x = state.player.pos.x;

    flags.press(false, state.phase);
    tick(&mut state, &flags.snapshot().into());
    assert_eq!(state.player.pos.x, x + PLAYER_SPEED);

    flags.press(true, state.phase);
    tick(&mut state, &flags.snapshot().into());
    assert_eq!(state.player.pos.x, x + PLAYER_SPEED);

    flags.release(false);
    tick(&mut state, &flags.snapshot().into());
    assert_eq!(state.player.pos.x, x);
}
