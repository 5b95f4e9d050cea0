//! Session controller
//!
//! Owns the game state for one play-through and drives the fixed-timestep
//! loop: frame limit, render, input poll, simulation tick, sound cue
//! forwarding, and the high-score handoff when the session ends naturally.
//! An external quit exits immediately without persisting.

use glam::IVec2;

use crate::assets::AssetBundle;
use crate::consts::*;
use crate::platform::{Frontend, Rgb};
use crate::score::ScoreStore;
use crate::sim::{GamePhase, GameState, SoundCue, TickInput, tick};

/// How one session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: u32,
    pub level: u32,
    /// True iff the score beat the stored high score and was persisted
    pub new_highscore: bool,
    /// True iff the session ended on an external quit (nothing persisted)
    pub quit: bool,
}

/// One play-through from spawn to loss-and-persist.
pub struct Session<'a> {
    state: GameState,
    assets: &'a AssetBundle,
    events: Vec<SoundCue>,
}

impl<'a> Session<'a> {
    pub fn new(assets: &'a AssetBundle, seed: u64, highscore: u32) -> Self {
        log::info!("session start: seed {seed}, highscore to beat {highscore}");
        Self {
            state: GameState::new(seed, highscore),
            assets,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn finished(&self) -> bool {
        self.state.phase == GamePhase::Terminated
    }

    /// Advance one frame and return the sound cues it produced.
    pub fn step(&mut self, input: &TickInput) -> &[SoundCue] {
        self.events.clear();
        tick(&mut self.state, input, self.assets, &mut self.events);
        &self.events
    }

    /// Compose the current frame: background, HUD, entities, healthbar, and
    /// the lost overlay while the countdown holds.
    pub fn render<F: Frontend + ?Sized>(&self, frontend: &mut F) {
        let state = &self.state;
        frontend.draw_background();

        frontend.draw_text(&format!("Lives: {}", state.lives), Rgb::WHITE, IVec2::new(10, 10));
        frontend.draw_text(&format!("Level: {}", state.level), Rgb::WHITE, IVec2::new(980, 10));
        frontend.draw_text(&format!("Score: {}", state.score), Rgb::WHITE, IVec2::new(10, 65));
        frontend.draw_text(&format!("Best: {}", state.highscore), Rgb::WHITE, IVec2::new(10, 120));

        for enemy in &state.enemies {
            frontend.draw_sprite(enemy.core.sprite, enemy.core.pos);
            for laser in &enemy.core.lasers {
                frontend.draw_sprite(laser.sprite, laser.pos);
            }
        }

        let player = &state.player;
        frontend.draw_sprite(player.core.sprite, player.core.pos);
        for laser in &player.core.lasers {
            frontend.draw_sprite(laser.sprite, laser.pos);
        }
        self.draw_healthbar(frontend);

        if state.phase != GamePhase::Playing {
            let message = format!("You lost! Score: {}", state.score);
            let size = frontend.text_size(&message);
            frontend.draw_text(
                &message,
                Rgb::WHITE,
                IVec2::new((WIDTH - size.x) / 2, (HEIGHT - size.y) / 2),
            );
        }

        frontend.present();
    }

    /// Two stacked rectangles under the sprite: red at full width, green
    /// scaled to the health fraction.
    fn draw_healthbar<F: Frontend + ?Sized>(&self, frontend: &mut F) {
        let player = &self.state.player;
        let sprite = self.assets.mask(player.core.sprite);
        let bar_pos = player.core.pos + IVec2::new(0, sprite.height() as i32 + 10);
        let full_width = sprite.width() as i32;
        frontend.draw_rect(Rgb::RED, bar_pos, IVec2::new(full_width, 10));
        let green_width = (full_width as f32 * player.health_ratio()) as i32;
        frontend.draw_rect(Rgb::GREEN, bar_pos, IVec2::new(green_width, 10));
    }

    /// Persist the score if it beats the stored high score and report how the
    /// session went. Called once, after natural termination.
    pub fn finish(&self, store: &mut ScoreStore) -> SessionOutcome {
        let beat = self.state.score > self.state.highscore;
        if beat {
            store.save_score(self.state.score);
        }
        log::info!(
            "session over: score {}, level {}, highscore {}",
            self.state.score,
            self.state.level,
            if beat { "beaten" } else { "held" }
        );
        SessionOutcome {
            score: self.state.score,
            level: self.state.level,
            new_highscore: beat,
            quit: false,
        }
    }

    /// Drive the session to completion against a frontend at the fixed frame
    /// rate. Returns early on an external quit.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F, store: &mut ScoreStore) -> SessionOutcome {
        loop {
            frontend.tick(FPS);
            self.render(frontend);

            let snapshot = frontend.poll_input();
            if snapshot.quit {
                log::info!("external quit after frame {}", self.state.frame);
                return SessionOutcome {
                    score: self.state.score,
                    level: self.state.level,
                    new_highscore: false,
                    quit: true,
                };
            }

            let input = snapshot.to_tick_input();
            self.events.clear();
            tick(&mut self.state, &input, self.assets, &mut self.events);
            for cue in &self.events {
                frontend.play_sound(cue.channel(), *cue);
            }

            if self.finished() {
                break;
            }
        }
        self.finish(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{DrawOp, HeadlessFrontend};

    #[test]
    fn render_brackets_the_frame() {
        let assets = AssetBundle::builtin();
        let session = Session::new(&assets, 1, 0);
        let mut frontend = HeadlessFrontend::new();
        session.render(&mut frontend);
        let draws = frontend.take_draws();
        assert_eq!(draws.first(), Some(&DrawOp::Background));
        assert_eq!(draws.last(), Some(&DrawOp::Present));
    }

    #[test]
    fn healthbar_scales_with_health() {
        let assets = AssetBundle::builtin();
        let mut session = Session::new(&assets, 1, 0);
        session.state_mut().player.core.health = 50;
        let mut frontend = HeadlessFrontend::new();
        session.render(&mut frontend);

        let rects: Vec<_> = frontend
            .take_draws()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Rect { color, size, .. } => Some((color, size)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], (Rgb::RED, IVec2::new(125, 10)));
        assert_eq!(rects[1], (Rgb::GREEN, IVec2::new(62, 10)));
    }

    #[test]
    fn lost_overlay_is_centered_while_losing() {
        let assets = AssetBundle::builtin();
        let mut session = Session::new(&assets, 1, 0);
        session.state_mut().player.core.health = 0;
        session.step(&TickInput::default());

        let mut frontend = HeadlessFrontend::new();
        session.render(&mut frontend);
        let overlay = frontend
            .take_draws()
            .into_iter()
            .find_map(|op| match op {
                DrawOp::Text { text, pos, .. } if text.starts_with("You lost!") => Some(pos),
                _ => None,
            })
            .expect("overlay drawn while losing");
        // Centered against the headless glyph metrics
        let message_len = "You lost! Score: 0".chars().count() as i32;
        assert_eq!(overlay.x, (WIDTH - message_len * 20) / 2);
        assert_eq!(overlay.y, (HEIGHT - 40) / 2);
    }

    #[test]
    fn hud_shows_the_loaded_highscore() {
        let assets = AssetBundle::builtin();
        let session = Session::new(&assets, 1, 77);
        let mut frontend = HeadlessFrontend::new();
        session.render(&mut frontend);
        assert!(frontend.take_draws().iter().any(|op| matches!(
            op,
            DrawOp::Text { text, .. } if text == "Best: 77"
        )));
    }
}
