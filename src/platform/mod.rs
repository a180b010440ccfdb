//! Platform abstraction layer
//!
//! Handles browser/native differences for wall-clock time. Gameplay
//! runs on its own session clock; wall time is only used for RNG seeds
//! and leaderboard timestamps.

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or_default()
}

/// RNG seed derived from the clock; good enough for casual spawns
pub fn seed_from_clock() -> u64 {
    now_ms() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_nonzero_and_monotoneish() {
        let a = now_ms();
        let b = now_ms();
        assert!(a > 0.0);
        assert!(b >= a);
    }
}
