//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Session clock driven only by `advance`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod session;
pub mod state;
pub mod tick;

pub use session::{GameOverSummary, Session};
pub use state::{GameEvent, GamePhase, GameState, Target};
pub use tick::{advance, click};
