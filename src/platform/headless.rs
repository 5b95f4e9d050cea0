//! Recording frontend
//!
//! No window, no audio device: draw calls and sound cues are appended to
//! public logs and input comes from a script. Used by the integration tests
//! and the unattended demo binary.

use std::collections::VecDeque;

use glam::IVec2;

use crate::assets::SpriteId;
use crate::sim::SoundCue;

use super::{Frontend, InputSnapshot, Rgb};

/// Glyph advance used to size text without a real font.
const GLYPH_WIDTH: i32 = 20;
const GLYPH_HEIGHT: i32 = 40;

/// One recorded draw call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Background,
    Sprite { sprite: SpriteId, pos: IVec2 },
    Rect { color: Rgb, pos: IVec2, size: IVec2 },
    Text { text: String, color: Rgb, pos: IVec2 },
    Present,
}

#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    /// Input script; once exhausted, polls return an idle snapshot.
    pub script: VecDeque<InputSnapshot>,
    pub draws: Vec<DrawOp>,
    pub sounds: Vec<(u8, SoundCue)>,
    pub frames_ticked: u32,
}

impl HeadlessFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a snapshot to be returned by the next `poll_input`.
    pub fn push_input(&mut self, snapshot: InputSnapshot) {
        self.script.push_back(snapshot);
    }

    /// Draw ops recorded since the last call, clearing the log.
    pub fn take_draws(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.draws)
    }
}

impl Frontend for HeadlessFrontend {
    fn poll_input(&mut self) -> InputSnapshot {
        self.script.pop_front().unwrap_or_default()
    }

    fn draw_background(&mut self) {
        self.draws.push(DrawOp::Background);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, pos: IVec2) {
        self.draws.push(DrawOp::Sprite { sprite, pos });
    }

    fn draw_rect(&mut self, color: Rgb, pos: IVec2, size: IVec2) {
        self.draws.push(DrawOp::Rect { color, pos, size });
    }

    fn draw_text(&mut self, text: &str, color: Rgb, pos: IVec2) {
        self.draws.push(DrawOp::Text {
            text: text.to_string(),
            color,
            pos,
        });
    }

    fn text_size(&self, text: &str) -> IVec2 {
        IVec2::new(text.chars().count() as i32 * GLYPH_WIDTH, GLYPH_HEIGHT)
    }

    fn play_sound(&mut self, channel: u8, cue: SoundCue) {
        self.sounds.push((channel, cue));
    }

    fn present(&mut self) {
        self.draws.push(DrawOp::Present);
    }

    fn tick(&mut self, _target_fps: u32) {
        // No pacing when headless; just count frames
        self.frames_ticked += 1;
    }
}
