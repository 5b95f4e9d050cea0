//! Wave/level director
//!
//! Refills the enemy set whenever it empties. Each wave is three enemies
//! larger than the last, and the spawn band climbs higher above the screen
//! every fourth level so later waves take longer to arrive and stack deeper.

use glam::IVec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState};
use crate::consts::*;

/// Advance to the next level and spawn its wave. Positions and variants come
/// from the state-owned RNG; there is no cap on concurrent enemies.
pub fn spawn_wave(state: &mut GameState) {
    state.level += 1;
    state.wave_length += WAVE_GROWTH;
    let band_top = SPAWN_BAND_DEPTH * (1 + state.level as i32 / 4);
    log::debug!(
        "wave {}: spawning {} enemies in y [{}, {})",
        state.level,
        state.wave_length,
        band_top,
        SPAWN_Y_MAX
    );
    for _ in 0..state.wave_length {
        let x = state.rng.random_range(SPAWN_MIN_X..SPAWN_MAX_X);
        let y = state.rng.random_range(band_top..SPAWN_Y_MAX);
        let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
        state.enemies.push(Enemy::new(IVec2::new(x, y), kind));
    }
}
