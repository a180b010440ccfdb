//! Spawn/expiry ticking and click handling
//!
//! The browser drives `advance` from its animation loop; the game runs
//! one spawn/expiry tick per elapsed cadence boundary. The cadence is
//! re-derived from the current level on every boundary, which replaces
//! the original's tear-down-and-recreate-the-interval dance: a level-up
//! changes the tick rate immediately.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Target};
use crate::consts::*;

/// Advance the session clock by `dt_ms` and run any due spawn/expiry
/// ticks. No-op unless Playing, so pausing freezes target ages.
pub fn advance(state: &mut GameState, dt_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.clock_ms += dt_ms.max(0.0);

    while state.phase == GamePhase::Playing {
        let interval = state.spawn_interval_ms();
        if state.clock_ms - state.last_spawn_ms < interval {
            break;
        }
        state.last_spawn_ms += interval;
        let tick_time = state.last_spawn_ms;
        spawn_expiry_tick(state, tick_time, &mut events);
    }

    events
}

/// One spawn/expiry tick: purge targets past their TTL, then spawn one
/// fresh target. Any expiry ends the session; the spawn is skipped on
/// that tick so a stopped session holds no target newer than game over.
fn spawn_expiry_tick(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    let before = state.targets.len();
    state.targets.retain(|t| !t.expired(now_ms));

    if state.targets.len() < before {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    let id = spawn_target(state, now_ms);
    events.push(GameEvent::TargetSpawned { id });
}

/// Generate one target fully inside the play area
fn spawn_target(state: &mut GameState, now_ms: f64) -> u64 {
    let size = state.rng.random_range(TARGET_MIN_SIZE..TARGET_MAX_SIZE);
    let x = state.rng.random_range(0.0..(PLAY_AREA_WIDTH - size));
    let y = state.rng.random_range(0.0..(PLAY_AREA_HEIGHT - size));

    let id = state.next_target_id();
    state.targets.push(Target {
        id,
        pos: Vec2::new(x, y),
        size,
        spawned_at_ms: now_ms,
    });
    id
}

/// Handle a click on a target. Silent no-op while paused, idle, over,
/// or when the target has already vanished.
pub fn click(state: &mut GameState, target_id: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    let Some(idx) = state.targets.iter().position(|t| t.id == target_id) else {
        return events;
    };

    state.targets.remove(idx);
    let reward = crate::reward(state.level);
    state.score += reward;
    state.combo += 1;
    events.push(GameEvent::TargetCaught {
        id: target_id,
        reward,
    });

    // Combo is never reset by a level-up, so levels arrive every
    // COMBO_PER_LEVEL additional catches until the cap.
    if state.combo % COMBO_PER_LEVEL == 0 && state.level < MAX_LEVEL {
        state.level += 1;
        events.push(GameEvent::LevelUp { level: state.level });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Catch the oldest live target, advancing until one spawns if needed.
    /// At levels whose interval is not exactly representable the boundary
    /// check can round short and defer the spawn one call, so loop.
    fn catch_one(state: &mut GameState) {
        while state.targets.is_empty() {
            let interval = state.spawn_interval_ms();
            advance(state, interval);
        }
        let id = state.targets[0].id;
        click(state, id);
    }

    #[test]
    fn test_spawn_cadence_at_level_one() {
        let mut state = started(42);
        let events = advance(&mut state, 999.0);
        assert!(events.is_empty());
        assert!(state.targets.is_empty());

        let events = advance(&mut state, 1.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::TargetSpawned { .. }));
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_spawned_target_fits_play_area() {
        let mut state = started(42);
        for _ in 0..200 {
            advance(&mut state, 1000.0);
            let t = state.targets[0].clone();
            assert!((TARGET_MIN_SIZE..TARGET_MAX_SIZE).contains(&t.size));
            assert!(t.pos.x >= 0.0 && t.pos.x + t.size <= PLAY_AREA_WIDTH);
            assert!(t.pos.y >= 0.0 && t.pos.y + t.size <= PLAY_AREA_HEIGHT);
            // Drop it so nothing expires and the cadence stays at level 1
            state.targets.clear();
        }
    }

    #[test]
    fn test_ten_catches_score_and_level_up() {
        let mut state = started(42);
        for _ in 0..10 {
            catch_one(&mut state);
        }
        assert_eq!(state.score, 100);
        assert_eq!(state.combo, 10);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_reward_scales_with_level_after_level_up() {
        let mut state = started(42);
        for _ in 0..10 {
            catch_one(&mut state);
        }
        assert_eq!(state.level, 2);
        catch_one(&mut state);
        assert_eq!(state.score, 100 + 20);
    }

    #[test]
    fn test_level_up_halves_spawn_interval() {
        let mut state = started(42);
        assert_eq!(state.spawn_interval_ms(), 1000.0);
        for _ in 0..10 {
            catch_one(&mut state);
        }
        assert_eq!(state.spawn_interval_ms(), 500.0);
    }

    #[test]
    fn test_click_while_paused_is_ignored() {
        let mut state = started(42);
        advance(&mut state, 1000.0);
        let id = state.targets[0].id;

        state.toggle_pause();
        let events = click(&mut state, id);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_click_on_vanished_target_is_noop() {
        let mut state = started(42);
        advance(&mut state, 1000.0);
        let events = click(&mut state, 999_999);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_unclicked_target_forces_game_over() {
        let mut state = started(42);
        // Spawns at t=1000, 2000, 3000; at t=4000 the first target is
        // 3000 ms old and expires.
        let events = advance(&mut state, 4000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
        assert!(!state.is_running());
    }

    #[test]
    fn test_no_spawn_on_game_over_tick() {
        let mut state = started(42);
        advance(&mut state, 3000.0);
        assert_eq!(state.targets.len(), 3);

        let before_ids: Vec<u64> = state.targets.iter().map(|t| t.id).collect();
        advance(&mut state, 1000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // First target expired, nothing new appeared
        assert_eq!(state.targets.len(), 2);
        for t in &state.targets {
            assert!(before_ids.contains(&t.id));
        }
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = started(42);
        advance(&mut state, 4000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let snapshot = state.targets.len();

        let events = advance(&mut state, 10_000.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.targets.len(), snapshot);
    }

    #[test]
    fn test_age_at_exact_ttl_does_not_expire() {
        let mut state = started(42);
        // Tick at t=3000 sees the t=1000 target at exactly 2000 ms old:
        // not strictly past TTL, so play continues.
        advance(&mut state, 3000.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.targets.len(), 3);
    }

    #[test]
    fn test_pause_freezes_target_ages() {
        let mut state = started(42);
        advance(&mut state, 1000.0);
        state.toggle_pause();

        // A long pause must not age the target into expiry
        advance(&mut state, 60_000.0);
        assert_eq!(state.targets.len(), 1);

        state.toggle_pause();
        let events = advance(&mut state, 500.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fractional_interval_spawn_catches_up() {
        let mut state = started(42);
        state.level = 3;
        // 1000/3 is not exactly representable, so a boundary check can
        // round short and defer the spawn to the next call. It must
        // never slip further than that.
        for _ in 0..100 {
            let mut calls = 0;
            while state.targets.is_empty() {
                let interval = state.spawn_interval_ms();
                advance(&mut state, interval);
                calls += 1;
                assert!(calls <= 2, "spawn deferred more than one call");
            }
            assert_eq!(state.phase, GamePhase::Playing);
            state.targets.clear();
        }
    }

    #[test]
    fn test_combo_survives_level_up() {
        let mut state = started(42);
        for _ in 0..25 {
            catch_one(&mut state);
        }
        assert_eq!(state.combo, 25);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = started(99_999);
        let mut state2 = started(99_999);

        for _ in 0..20 {
            advance(&mut state1, 333.0);
            advance(&mut state2, 333.0);
            if let Some(t) = state1.targets.first() {
                let id = t.id;
                click(&mut state1, id);
                click(&mut state2, id);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.combo, state2.combo);
        assert_eq!(state1.targets.len(), state2.targets.len());
        for (a, b) in state1.targets.iter().zip(state2.targets.iter()) {
            assert_eq!(a, b);
        }
    }

    proptest! {
        #[test]
        fn prop_reward_is_linear_in_level(level in 1u32..=1000) {
            prop_assert_eq!(crate::reward(level), 10 * level as u64);
        }

        #[test]
        fn prop_level_monotone_and_capped(catches in 0usize..400, seed in 0u64..1000) {
            let mut state = GameState::new(seed);
            state.start();
            let mut prev_level = state.level;
            for _ in 0..catches {
                while state.targets.is_empty() && state.phase == GamePhase::Playing {
                    let interval = state.spawn_interval_ms();
                    advance(&mut state, interval);
                }
                if state.phase != GamePhase::Playing {
                    break;
                }
                let id = state.targets[0].id;
                click(&mut state, id);
                prop_assert!(state.level >= prev_level);
                prop_assert!(state.level <= MAX_LEVEL);
                prev_level = state.level;
            }
        }
    }
}
