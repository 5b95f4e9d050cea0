//! Presentation-layer contract
//!
//! The simulation never draws, polls or plays anything itself; the session
//! controller talks to one `Frontend` implementation per process. A real
//! frontend wraps a window, an input pump and a mixer. The headless frontend
//! records everything for tests and unattended runs.

pub mod headless;

use glam::IVec2;

use crate::assets::SpriteId;
use crate::sim::{SoundCue, TickInput};

/// 8-bit RGB color for rects and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

/// One frame's worth of polled input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Window close / external quit; terminates immediately, no persist
    pub quit: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost_left: bool,
    pub boost_right: bool,
    pub space: bool,
    pub mouse_left: bool,
}

impl InputSnapshot {
    /// Collapse to the simulation's input model. Mouse-left and spacebar both
    /// mean fire.
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            boost_left: self.boost_left,
            boost_right: self.boost_right,
            shoot: self.mouse_left || self.space,
        }
    }
}

/// Everything the session controller needs from the outside world.
pub trait Frontend {
    /// Drain pending window/input events into a snapshot of held state.
    fn poll_input(&mut self) -> InputSnapshot;

    fn draw_background(&mut self);
    fn draw_sprite(&mut self, sprite: SpriteId, pos: IVec2);
    fn draw_rect(&mut self, color: Rgb, pos: IVec2, size: IVec2);
    fn draw_text(&mut self, text: &str, color: Rgb, pos: IVec2);
    /// Rendered extent of `text`, for centered overlays.
    fn text_size(&self, text: &str) -> IVec2;

    /// Play `cue` on the given mixer channel.
    fn play_sound(&mut self, channel: u8, cue: SoundCue);

    /// Flip the finished frame to the screen.
    fn present(&mut self);

    /// Frame-rate limiter: block until the next frame boundary at
    /// `target_fps`. Headless implementations may return immediately.
    fn tick(&mut self, target_fps: u32);
}
