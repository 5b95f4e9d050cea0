//! Per-frame simulation step
//!
//! `tick` advances the session by exactly one frame at the fixed 60 Hz step.
//! The update order is load-bearing and mirrors the session contract: loss
//! check, wave refill, player movement, player fire, then each enemy
//! (descend, laser pass against the player, fire roll, body-vs-bottom
//! resolution), and finally the player's laser pass against the enemy set.

use glam::IVec2;
use rand::Rng;

use super::state::{GamePhase, GameState, SoundCue};
use super::wave::spawn_wave;
use crate::assets::AssetBundle;
use crate::consts::*;
use crate::sim::mask::collide;

/// Held-input snapshot for a single frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Faster horizontal-only pair; stacks with `left`/`right` when both held
    pub boost_left: bool,
    pub boost_right: bool,
    /// Mouse-left or spacebar, merged by the caller
    pub shoot: bool,
}

/// Advance the game state by one frame. Sound cues for the presentation layer
/// are appended to `events`.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    assets: &AssetBundle,
    events: &mut Vec<SoundCue>,
) {
    if state.phase == GamePhase::Terminated {
        return;
    }
    state.frame += 1;

    if state.lives <= 0 || state.player.core.health <= 0 {
        state.phase = GamePhase::Losing;
        state.lost_count += 1;
    }
    if state.phase == GamePhase::Losing {
        // Gameplay is suspended while the lost overlay holds
        if state.lost_count > LOSS_DELAY_FRAMES {
            state.phase = GamePhase::Terminated;
        }
        return;
    }

    if state.enemies.is_empty() {
        spawn_wave(state);
    }

    // Both movement tiers are live at once and stack when both are held
    let mut delta = IVec2::ZERO;
    if input.left {
        delta.x -= PLAYER_VEL;
    }
    if input.right {
        delta.x += PLAYER_VEL;
    }
    if input.up {
        delta.y -= PLAYER_VEL;
    }
    if input.down {
        delta.y += PLAYER_VEL;
    }
    if input.boost_left {
        delta.x -= PLAYER_BOOST_VEL;
    }
    if input.boost_right {
        delta.x += PLAYER_BOOST_VEL;
    }
    state.player.core.pos += delta;

    if input.shoot {
        state.player.shoot(events);
    }

    // Enemy pass. Removal happens after the scan so iteration stays stable.
    let mut destroyed: Vec<usize> = Vec::new();
    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.descend(ENEMY_VEL);
        enemy.advance_lasers(LASER_VEL, &mut state.player, assets, events);
        if state.rng.random_range(0..ENEMY_FIRE_ODDS) == 1 {
            enemy.shoot(events);
        }
        let enemy_mask = assets.mask(enemy.core.sprite);
        if collide(
            enemy_mask,
            enemy.core.pos,
            assets.mask(state.player.core.sprite),
            state.player.core.pos,
        ) {
            // Body collision wins over the bottom-of-screen check when both
            // hold in the same frame
            state.player.core.health -= RAM_DAMAGE;
            events.push(SoundCue::Explosion);
            destroyed.push(i);
        } else if enemy.core.pos.y + enemy_mask.height() as i32 > HEIGHT {
            state.lives -= 1;
            destroyed.push(i);
        }
    }
    for i in destroyed.into_iter().rev() {
        state.enemies.remove(i);
    }

    state.score = state.player.advance_lasers(
        LASER_VEL,
        &mut state.enemies,
        state.score,
        assets,
        events,
    );
}
