//! Pixel Raiders - a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision masks, game state)
//! - `assets`: Collision-mask bundle, constructed once at startup
//! - `platform`: Presentation-layer contract (rendering, input, audio cues)
//! - `session`: Fixed-timestep session controller
//! - `score`: Durable high-score store
//! - `settings`: Player preferences and determinism hooks

pub mod assets;
pub mod platform;
pub mod score;
pub mod session;
pub mod settings;
pub mod sim;

pub use score::ScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size (pixels)
    pub const WIDTH: i32 = 1200;
    pub const HEIGHT: i32 = 1200;

    /// Fixed frame rate target
    pub const FPS: u32 = 60;

    /// Frames a weapon stays unusable after a shot (0.5s at 60 Hz)
    pub const COOLDOWN: u32 = 30;

    /// Player movement speed (pixels/frame) for the main key set
    pub const PLAYER_VEL: i32 = 5;
    /// Faster horizontal-only tier; stacks with the main set when both are held
    pub const PLAYER_BOOST_VEL: i32 = 10;
    /// Enemy descent speed (pixels/frame)
    pub const ENEMY_VEL: i32 = 2;
    /// Laser travel speed (pixels/frame), sign applied by the owner
    pub const LASER_VEL: i32 = 5;

    /// Horizontal centering correction applied to every spawned laser
    pub const LASER_CENTER_OFFSET: i32 = 13;

    /// Damage an enemy laser deals to the player
    pub const ENEMY_LASER_DAMAGE: i32 = 10;
    /// Damage a body collision deals to the player
    pub const RAM_DAMAGE: i32 = 50;

    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const ENEMY_MAX_HEALTH: i32 = 100;

    /// Player spawn position (top-left of sprite)
    pub const PLAYER_START_X: i32 = 550;
    pub const PLAYER_START_Y: i32 = 1000;
    pub const START_LIVES: i32 = 1;

    /// Enemies added to each successive wave
    pub const WAVE_GROWTH: u32 = 3;
    /// Horizontal spawn range [min, max)
    pub const SPAWN_MIN_X: i32 = 10;
    pub const SPAWN_MAX_X: i32 = WIDTH - 100;
    /// Vertical spawn band: [SPAWN_BAND_DEPTH * (1 + level/4), SPAWN_Y_MAX)
    pub const SPAWN_BAND_DEPTH: i32 = -1500;
    pub const SPAWN_Y_MAX: i32 = -100;

    /// Per-enemy per-frame fire roll: one face of this die fires (~every 2s)
    pub const ENEMY_FIRE_ODDS: u32 = 2 * FPS;

    /// Frames the "you lost" overlay holds before the session terminates
    pub const LOSS_DELAY_FRAMES: u32 = FPS * 3;
}
