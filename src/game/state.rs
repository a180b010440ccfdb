//! Game state and core gameplay types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Initial state and state after an explicit reset
    #[default]
    Idle,
    /// Active gameplay, targets spawning and expiring
    Playing,
    /// Ticking suspended, session state preserved
    Paused,
    /// A target expired unclicked
    GameOver,
}

/// A clickable circle. Never mutated after spawn, only removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u64,
    /// Top-left corner; the full circle fits inside the play area
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Session-clock time of spawn (ms)
    pub spawned_at_ms: f64,
}

impl Target {
    /// Age of this target at the given session-clock time (ms)
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.spawned_at_ms
    }

    /// Whether this target has outlived its TTL
    #[inline]
    pub fn expired(&self, now_ms: f64) -> bool {
        self.age_ms(now_ms) > TARGET_TTL_MS
    }
}

/// Things that happened during a tick or click, for the session owner
/// to translate into sounds, HUD updates, and high score bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    TargetSpawned { id: u64 },
    TargetCaught { id: u64, reward: u64 },
    LevelUp { level: u32 },
    GameOver { score: u64 },
    /// Emitted by the session owner when the final score beats the board
    NewHighScore { score: u64 },
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: u64,
    /// 1..=MAX_LEVEL, monotone non-decreasing within a session
    pub level: u32,
    /// Consecutive catches this session; never reset by level-ups
    pub combo: u32,
    pub phase: GamePhase,
    /// Live targets, oldest first
    pub targets: Vec<Target>,
    /// Session clock (ms); advances only while Playing, so target ages
    /// are frozen across pauses
    pub clock_ms: f64,
    /// Spawn cadence anchor: clock time of the last spawn/expiry tick
    pub(crate) last_spawn_ms: f64,
    pub(crate) next_id: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session in Idle with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            score: 0,
            level: 1,
            combo: 0,
            phase: GamePhase::Idle,
            targets: Vec::new(),
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a target ID (monotonic, unique per spawn)
    pub(crate) fn next_target_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current spawn interval, derived from level on every use so a
    /// level-up takes effect at the next cadence boundary
    #[inline]
    pub fn spawn_interval_ms(&self) -> f64 {
        crate::spawn_interval_ms(self.level)
    }

    /// Start (or restart) play: clears score, combo, level, targets and
    /// the game-over condition, then begins ticking. Valid from any phase.
    pub fn start(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.level = 1;
        self.targets.clear();
        self.clock_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.phase = GamePhase::Playing;
    }

    /// Toggle Playing <-> Paused. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Return to Idle, clearing all session state. The leaderboard is
    /// owned elsewhere and untouched.
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.level = 1;
        self.targets.clear();
        self.clock_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.phase = GamePhase::Idle;
    }

    /// Whether the spawn driver is live (Playing, not Paused/Idle/GameOver)
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.combo, 0);
        assert!(state.targets.is_empty());
    }

    #[test]
    fn test_start_clears_session_state() {
        let mut state = GameState::new(7);
        state.score = 500;
        state.combo = 12;
        state.level = 3;
        state.phase = GamePhase::GameOver;

        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.level, 1);
        assert!(state.targets.is_empty());
    }

    #[test]
    fn test_pause_only_toggles_between_playing_and_paused() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reset_returns_to_idle_from_any_phase() {
        for phase in [GamePhase::Playing, GamePhase::Paused, GamePhase::GameOver] {
            let mut state = GameState::new(7);
            state.start();
            state.score = 90;
            state.phase = phase;

            state.reset();
            assert_eq!(state.phase, GamePhase::Idle);
            assert_eq!(state.score, 0);
            assert_eq!(state.level, 1);
            assert_eq!(state.combo, 0);
            assert!(state.targets.is_empty());
        }
    }

    #[test]
    fn test_target_expiry_is_strictly_greater_than_ttl() {
        let target = Target {
            id: 1,
            pos: Vec2::ZERO,
            size: 30.0,
            spawned_at_ms: 100.0,
        };
        assert!(!target.expired(100.0 + crate::consts::TARGET_TTL_MS));
        assert!(target.expired(100.0 + crate::consts::TARGET_TTL_MS + 0.1));
    }
}
