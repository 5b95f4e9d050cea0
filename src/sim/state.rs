//! Game state and entity types
//!
//! Ships share a `ShipCore` record wrapped by `Player` and `Enemy`, which own
//! the behavior that differs: which direction lasers travel, what a hit does,
//! and where the spawn offset lands.
//!
//! All randomness flows through the `Pcg32` owned by `GameState`, so a fixed
//! seed replays a session exactly.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::mask::collide;
use crate::assets::{AssetBundle, SpriteId};
use crate::consts::*;

/// Current phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health or lives exhausted; the lost overlay holds for three seconds
    Losing,
    /// Countdown expired, session is over
    Terminated,
}

/// Audio cue emitted by the simulation, played by the presentation layer.
/// Channel numbers are fixed per cue: 0 player laser, 1 enemy laser,
/// 2 explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PlayerLaser,
    EnemyLaser,
    Explosion,
}

impl SoundCue {
    pub fn channel(self) -> u8 {
        match self {
            SoundCue::PlayerLaser => 0,
            SoundCue::EnemyLaser => 1,
            SoundCue::Explosion => 2,
        }
    }
}

/// A live projectile. The mask reference is fixed at spawn.
#[derive(Debug, Clone)]
pub struct Laser {
    pub pos: IVec2,
    pub sprite: SpriteId,
}

impl Laser {
    /// Spawn at `(x, y)` with the fixed horizontal centering correction.
    pub fn new(x: i32, y: i32, sprite: SpriteId) -> Self {
        Self {
            pos: IVec2::new(x + LASER_CENTER_OFFSET, y),
            sprite,
        }
    }

    /// Vertical motion; the owner chooses the sign (positive = downward).
    pub fn advance(&mut self, velocity: i32) {
        self.pos.y += velocity;
    }

    /// True once the laser has left `[0, height]`; drives removal.
    pub fn off_screen(&self, height: i32) -> bool {
        self.pos.y > height || self.pos.y < 0
    }

    /// Pixel-mask test against another positioned sprite.
    pub fn hits(&self, assets: &AssetBundle, sprite: SpriteId, pos: IVec2) -> bool {
        collide(assets.mask(self.sprite), self.pos, assets.mask(sprite), pos)
    }
}

/// State shared by every combatant: position, health, a cooldown-gated weapon
/// and the lasers it owns.
#[derive(Debug, Clone)]
pub struct ShipCore {
    pub pos: IVec2,
    pub health: i32,
    pub cool_down: u32,
    pub lasers: Vec<Laser>,
    pub sprite: SpriteId,
    pub laser_sprite: SpriteId,
}

impl ShipCore {
    fn new(pos: IVec2, health: i32, sprite: SpriteId, laser_sprite: SpriteId) -> Self {
        Self {
            pos,
            health,
            cool_down: 0,
            lasers: Vec::new(),
            sprite,
            laser_sprite,
        }
    }

    /// Once per frame, before the owner's laser pass. The counter rests at 0
    /// (weapon ready), jumps to 1 on a shot, climbs to `COOLDOWN`, then wraps
    /// back to 0 - so the weapon is usable once every 30 frames.
    pub fn step_cooldown(&mut self) {
        if self.cool_down >= COOLDOWN {
            self.cool_down = 0;
        } else if self.cool_down > 0 {
            self.cool_down += 1;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cool_down == 0
    }

    /// Fire from horizontal position `x` if the weapon is ready. The fire cue
    /// is suppressed for off-screen spawns (a guard that is always true for
    /// the player; enemy ships above the screen open fire silently).
    fn fire_from(&mut self, x: i32, cue: SoundCue, events: &mut Vec<SoundCue>) {
        if self.cool_down != 0 {
            return;
        }
        let laser = Laser::new(x, self.pos.y, self.laser_sprite);
        if !laser.off_screen(HEIGHT) {
            events.push(cue);
        }
        self.lasers.push(laser);
        self.cool_down = 1;
    }
}

/// The player ship. One per session.
#[derive(Debug, Clone)]
pub struct Player {
    pub core: ShipCore,
    pub max_health: i32,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            core: ShipCore::new(
                pos,
                PLAYER_MAX_HEALTH,
                SpriteId::PlayerShip,
                SpriteId::PlayerLaser,
            ),
            max_health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn shoot(&mut self, events: &mut Vec<SoundCue>) {
        self.core
            .fire_from(self.core.pos.x, SoundCue::PlayerLaser, events);
    }

    /// Healthbar fill fraction in `[0, 1]`; health itself may be negative.
    pub fn health_ratio(&self) -> f32 {
        self.core.health.max(0) as f32 / self.max_health as f32
    }

    /// Advance this ship's lasers upward by `velocity`, dropping off-screen
    /// ones. A laser that hits an enemy destroys it, scores one point and is
    /// consumed - it cannot hit a second enemy in the same frame. Returns the
    /// updated score so the threading stays explicit.
    pub fn advance_lasers(
        &mut self,
        velocity: i32,
        enemies: &mut Vec<Enemy>,
        mut score: u32,
        assets: &AssetBundle,
        events: &mut Vec<SoundCue>,
    ) -> u32 {
        self.core.step_cooldown();
        let mut kept = Vec::with_capacity(self.core.lasers.len());
        for mut laser in std::mem::take(&mut self.core.lasers) {
            laser.advance(-velocity);
            if laser.off_screen(HEIGHT) {
                continue;
            }
            let hit = enemies
                .iter()
                .position(|e| laser.hits(assets, e.core.sprite, e.core.pos));
            match hit {
                Some(i) => {
                    enemies.remove(i);
                    score += 1;
                    events.push(SoundCue::Explosion);
                }
                None => kept.push(laser),
            }
        }
        self.core.lasers = kept;
        score
    }
}

/// Cosmetic enemy variant. No gameplay difference between the three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Cat,
    Raccoon,
    Fox,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Cat, EnemyKind::Raccoon, EnemyKind::Fox];

    pub fn sprite(self) -> SpriteId {
        match self {
            EnemyKind::Cat => SpriteId::EnemyCat,
            EnemyKind::Raccoon => SpriteId::EnemyRaccoon,
            EnemyKind::Fox => SpriteId::EnemyFox,
        }
    }
}

/// A descending enemy ship.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub core: ShipCore,
    pub kind: EnemyKind,
    pub max_health: i32,
}

impl Enemy {
    pub fn new(pos: IVec2, kind: EnemyKind) -> Self {
        Self {
            core: ShipCore::new(pos, ENEMY_MAX_HEALTH, kind.sprite(), SpriteId::EnemyLaser),
            kind,
            max_health: ENEMY_MAX_HEALTH,
        }
    }

    /// Constant-speed vertical descent.
    pub fn descend(&mut self, velocity: i32) {
        self.core.pos.y += velocity;
    }

    /// Enemy fire compensates for the laser centering correction so the bolt
    /// spawns at the ship's own x.
    pub fn shoot(&mut self, events: &mut Vec<SoundCue>) {
        self.core.fire_from(
            self.core.pos.x - LASER_CENTER_OFFSET,
            SoundCue::EnemyLaser,
            events,
        );
    }

    /// Advance this ship's lasers downward by `velocity`, dropping off-screen
    /// ones. Each laser damages the target at most once: on hit it applies the
    /// fixed decrement and is consumed.
    pub fn advance_lasers(
        &mut self,
        velocity: i32,
        target: &mut Player,
        assets: &AssetBundle,
        events: &mut Vec<SoundCue>,
    ) {
        self.core.step_cooldown();
        let mut kept = Vec::with_capacity(self.core.lasers.len());
        for mut laser in std::mem::take(&mut self.core.lasers) {
            laser.advance(velocity);
            if laser.off_screen(HEIGHT) {
                continue;
            }
            if laser.hits(assets, target.core.sprite, target.core.pos) {
                target.core.health -= ENEMY_LASER_DAMAGE;
                events.push(SoundCue::Explosion);
                continue;
            }
            kept.push(laser);
        }
        self.core.lasers = kept;
    }
}

/// Complete session state. Ownership is strict containment: the state owns
/// the player and the enemy collection, each ship owns its lasers.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Monotonic; +1 per enemy destroyed by the player
    pub score: u32,
    /// Loaded once from the score store at session start
    pub highscore: u32,
    pub lives: i32,
    /// Wave counter; each refill increments it
    pub level: u32,
    /// Enemies per wave; grows by `WAVE_GROWTH` each level
    pub wave_length: u32,
    /// Frames spent in `Losing`
    pub lost_count: u32,
    pub frame: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

impl GameState {
    pub fn new(seed: u64, highscore: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            highscore,
            lives: START_LIVES,
            level: 0,
            wave_length: 0,
            lost_count: 0,
            frame: 0,
            player: Player::new(IVec2::new(PLAYER_START_X, PLAYER_START_Y)),
            enemies: Vec::new(),
        }
    }
}
