//! Catch the Circles - a casual reaction-time browser game
//!
//! Core modules:
//! - `game`: Deterministic gameplay core (targets, scoring, session lifecycle)
//! - `background`: Decorative space background simulation
//! - `highscores`: In-memory leaderboard (process lifetime only)
//! - `settings`: Preferences
//! - `post`: Host platform post-creation integration
//! - `platform`: Browser/native time abstraction

pub mod background;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod post;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::{GamePhase, GameState, Session};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (arbitrary units, mirrored by the page layout)
    pub const PLAY_AREA_WIDTH: f32 = 200.0;
    pub const PLAY_AREA_HEIGHT: f32 = 300.0;

    /// Target diameter range (uniform per spawn)
    pub const TARGET_MIN_SIZE: f32 = 20.0;
    pub const TARGET_MAX_SIZE: f32 = 50.0;

    /// How long an unclicked target lives before it forces game over (ms)
    pub const TARGET_TTL_MS: f64 = 2000.0;

    /// Spawn cadence at level 1 (ms); cadence = BASE_SPAWN_INTERVAL_MS / level
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 1000.0;

    /// Level cap
    pub const MAX_LEVEL: u32 = 1000;

    /// Points per catch, multiplied by the current level
    pub const REWARD_PER_LEVEL: u64 = 10;

    /// Consecutive catches needed per level-up
    pub const COMBO_PER_LEVEL: u32 = 10;

    /// Decorative background animation tick (ms, ~60 Hz)
    pub const BACKGROUND_TICK_MS: f64 = 16.0;
}

/// Points awarded for catching a target at the given level
#[inline]
pub fn reward(level: u32) -> u64 {
    consts::REWARD_PER_LEVEL * u64::from(level.clamp(1, consts::MAX_LEVEL))
}

/// Spawn interval in milliseconds for the given level (1 ms floor at the cap)
#[inline]
pub fn spawn_interval_ms(level: u32) -> f64 {
    consts::BASE_SPAWN_INTERVAL_MS / f64::from(level.clamp(1, consts::MAX_LEVEL))
}
