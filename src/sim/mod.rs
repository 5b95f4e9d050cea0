//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only (one `tick` call = one 60 Hz frame)
//! - Seeded RNG only, owned by `GameState`
//! - No rendering, audio or platform dependencies; the presentation layer
//!   receives draw state and `SoundCue`s, nothing flows back in

pub mod mask;
pub mod state;
pub mod tick;
pub mod wave;

pub use mask::{MaskError, SpriteMask, collide};
pub use state::{Enemy, EnemyKind, GamePhase, GameState, Laser, Player, ShipCore, SoundCue};
pub use tick::{TickInput, tick};
pub use wave::spawn_wave;
