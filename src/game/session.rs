//! Session owner: one `GameState` plus the process-lifetime high scores
//!
//! The session translates raw game events into leaderboard updates and
//! exposes the lifecycle operations the control buttons call. High
//! scores live here, not in `GameState`, so start/restart/reset can
//! wipe the session without touching them.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick;
use crate::highscores::HighScores;

/// Outcome of the most recent game over, for the summary modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u64,
    pub level: u32,
    /// Leaderboard rank achieved (1-indexed), if the score qualified
    pub rank: Option<usize>,
    /// Whether this run beat the previous best
    pub new_best: bool,
}

/// A live game session and its surrounding bookkeeping
#[derive(Debug)]
pub struct Session {
    state: GameState,
    highscores: HighScores,
    last_game_over: Option<GameOverSummary>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            highscores: HighScores::new(),
            last_game_over: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Best score ever achieved this process lifetime (0 if none)
    pub fn high_score(&self) -> u64 {
        self.highscores.top_score().unwrap_or(0)
    }

    pub fn last_game_over(&self) -> Option<&GameOverSummary> {
        self.last_game_over.as_ref()
    }

    /// Start or restart play (identical per the lifecycle contract)
    pub fn start(&mut self) {
        self.state.start();
        self.last_game_over = None;
        log::info!("session started");
    }

    /// Toggle pause; no-op outside Playing/Paused
    pub fn toggle_pause(&mut self) {
        let before = self.state.phase;
        self.state.toggle_pause();
        if self.state.phase != before {
            log::info!("session {:?} -> {:?}", before, self.state.phase);
        }
    }

    /// Clear everything back to Idle; high scores survive
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_game_over = None;
        log::info!("session reset");
    }

    /// Advance the session clock, folding a game over into the
    /// leaderboard exactly once.
    pub fn advance(&mut self, dt_ms: f64, now_ms: f64) -> Vec<GameEvent> {
        let mut events = tick::advance(&mut self.state, dt_ms);
        if let Some(GameEvent::GameOver { score }) = events
            .iter()
            .find(|e| matches!(e, GameEvent::GameOver { .. }))
            .copied()
        {
            let new_best = score > self.high_score();
            let rank = self.highscores.add_score(score, self.state.level, now_ms);
            self.last_game_over = Some(GameOverSummary {
                score,
                level: self.state.level,
                rank,
                new_best,
            });
            if new_best {
                events.push(GameEvent::NewHighScore { score });
            }
            log::info!(
                "game over: score {} level {} (best {})",
                score,
                self.state.level,
                self.high_score()
            );
        }
        events
    }

    /// Forward a click on a target
    pub fn click(&mut self, target_id: u64) -> Vec<GameEvent> {
        tick::click(&mut self.state, target_id)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }
}
