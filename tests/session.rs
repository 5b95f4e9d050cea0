//! End-to-end session tests against the headless frontend and a real
//! score-store file.

use std::path::PathBuf;

use pixel_raiders::ScoreStore;
use pixel_raiders::assets::AssetBundle;
use pixel_raiders::consts::LOSS_DELAY_FRAMES;
use pixel_raiders::platform::InputSnapshot;
use pixel_raiders::platform::headless::HeadlessFrontend;
use pixel_raiders::session::Session;
use pixel_raiders::sim::SoundCue;

fn temp_scores(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "pixel_raiders_it_{name}_{}.json",
        std::process::id()
    ));
    std::fs::remove_file(&path).ok();
    path
}

#[test]
fn losing_session_persists_the_score_exactly_once() {
    let path = temp_scores("persist_once");
    let assets = AssetBundle::builtin();
    let mut store = ScoreStore::open(&path);

    let mut session = Session::new(&assets, 1, 10);
    session.state_mut().score = 12;
    session.state_mut().player.core.health = 0;

    let mut frontend = HeadlessFrontend::new();
    let outcome = session.run(&mut frontend, &mut store);

    assert!(!outcome.quit);
    assert_eq!(outcome.score, 12);
    assert!(outcome.new_highscore);
    // Holds three seconds of frames, then one terminating frame
    assert_eq!(frontend.frames_ticked, LOSS_DELAY_FRAMES + 1);

    // One append, not several: the file is exactly one row
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[12]");
    assert_eq!(ScoreStore::open(&path).highscore(), 12);
    std::fs::remove_file(&path).ok();
}

#[test]
fn score_below_highscore_is_not_persisted() {
    let path = temp_scores("held");
    let assets = AssetBundle::builtin();
    let mut store = ScoreStore::open(&path);
    store.save_score(10);

    let mut session = Session::new(&assets, 2, store.highscore());
    session.state_mut().score = 5;
    session.state_mut().player.core.health = 0;

    let mut frontend = HeadlessFrontend::new();
    let outcome = session.run(&mut frontend, &mut store);

    assert!(!outcome.new_highscore);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[10]");
    std::fs::remove_file(&path).ok();
}

#[test]
fn external_quit_exits_immediately_without_persisting() {
    let path = temp_scores("quit");
    let assets = AssetBundle::builtin();
    let mut store = ScoreStore::open(&path);

    let mut session = Session::new(&assets, 3, 0);
    session.state_mut().score = 42;

    let mut frontend = HeadlessFrontend::new();
    frontend.push_input(InputSnapshot {
        quit: true,
        ..Default::default()
    });
    let outcome = session.run(&mut frontend, &mut store);

    assert!(outcome.quit);
    assert!(!outcome.new_highscore);
    assert!(!session.finished(), "quit is not a natural termination");
    assert!(!path.exists(), "quit must not write the score store");
}

#[test]
fn fire_cues_reach_the_frontend_on_their_channel() {
    let path = temp_scores("cues");
    let assets = AssetBundle::builtin();
    let mut store = ScoreStore::open(&path);

    let mut session = Session::new(&assets, 4, 0);
    let mut frontend = HeadlessFrontend::new();
    frontend.push_input(InputSnapshot {
        space: true,
        ..Default::default()
    });
    frontend.push_input(InputSnapshot {
        quit: true,
        ..Default::default()
    });
    session.run(&mut frontend, &mut store);

    assert!(
        frontend.sounds.contains(&(0, SoundCue::PlayerLaser)),
        "spacebar shot should fire on channel 0, got {:?}",
        frontend.sounds
    );
}

#[test]
fn mouse_fire_works_like_spacebar() {
    let path = temp_scores("mouse");
    let assets = AssetBundle::builtin();
    let mut store = ScoreStore::open(&path);

    let mut session = Session::new(&assets, 5, 0);
    let mut frontend = HeadlessFrontend::new();
    frontend.push_input(InputSnapshot {
        mouse_left: true,
        ..Default::default()
    });
    frontend.push_input(InputSnapshot {
        quit: true,
        ..Default::default()
    });
    session.run(&mut frontend, &mut store);

    assert_eq!(session.state().player.core.lasers.len(), 1);
    assert!(frontend.sounds.contains(&(0, SoundCue::PlayerLaser)));
}
