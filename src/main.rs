//! Pixel Raiders entry point
//!
//! Wires the explicit handles together (settings, assets, score store) and
//! runs one unattended demo session against the headless frontend, with a
//! small autopilot standing in for a human pilot. A windowed build would swap
//! in a real `Frontend` implementation and feed `poll_input` from the OS.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pixel_raiders::ScoreStore;
use pixel_raiders::assets::AssetBundle;
use pixel_raiders::consts::PLAYER_VEL;
use pixel_raiders::platform::Frontend;
use pixel_raiders::platform::headless::HeadlessFrontend;
use pixel_raiders::session::{Session, SessionOutcome};
use pixel_raiders::settings::Settings;
use pixel_raiders::sim::{GameState, TickInput};

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pixel-raiders")
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Chase the lowest (most urgent) enemy horizontally and hold fire. Boost
/// when the gap is wide. Same idea as a demo/attract mode.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        shoot: true,
        ..Default::default()
    };
    if let Some(target) = state.enemies.iter().max_by_key(|e| e.core.pos.y) {
        // Align sprite centers: the player is 25px wider than an enemy
        let target_x = target.core.pos.x - 12;
        let dx = target_x - state.player.core.pos.x;
        if dx < -PLAYER_VEL {
            input.left = true;
        } else if dx > PLAYER_VEL {
            input.right = true;
        }
        if dx.abs() > 200 {
            input.boost_left = input.left;
            input.boost_right = input.right;
        }
    }
    input
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let dir = data_dir();
    let settings = Settings::load(&dir.join("settings.json"));

    let mut assets = AssetBundle::builtin();
    let mask_dir = dir.join("masks");
    if mask_dir.is_dir() {
        // A broken mask install should fail here, before the session starts
        assets.load_overrides(&mask_dir)?;
    }

    let scores_path = settings
        .scores_path
        .clone()
        .unwrap_or_else(|| dir.join("scores.json"));
    let mut store = ScoreStore::open(scores_path);

    let seed = settings.seed.unwrap_or_else(entropy_seed);
    let mut session = Session::new(&assets, seed, store.highscore());
    let mut frontend = HeadlessFrontend::new();

    let mut frames = 0u32;
    while !session.finished() && frames < settings.demo_frame_cap {
        let input = autopilot(session.state());
        for cue in session.step(&input) {
            frontend.play_sound(cue.channel(), *cue);
        }
        session.render(&mut frontend);
        frontend.take_draws();
        frames += 1;
    }

    let outcome = if session.finished() {
        session.finish(&mut store)
    } else {
        log::info!("demo frame cap reached, nothing persisted");
        SessionOutcome {
            score: session.state().score,
            level: session.state().level,
            new_highscore: false,
            quit: true,
        }
    };

    log::info!(
        "demo over after {frames} frames: score {} at level {}{}",
        outcome.score,
        outcome.level,
        if outcome.new_highscore {
            " (new highscore)"
        } else {
            ""
        }
    );
    Ok(())
}
