//! Round flow driven through the engine

mod common;

use common::{alive_of, game};
use rock_galaxy::{AsteroidSize, GameStatus, SpriteKind};
use sprite_engine::input::{InputState, Keys};
use sprite_engine::render::RecordingRenderer;
use sprite_engine::{Application, Engine, EngineConfig};

fn press(key: Keys) -> InputState {
    InputState::from_transition(Keys::empty(), key)
}

#[test]
fn test_startup_shows_menu() {
    let (mut game, _audio) = game(1);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();

    assert_eq!(game.state().status, GameStatus::Menu);
    assert!(engine.world().is_paused());
    assert_eq!(engine.world().len(), 1);

    let mut renderer = RecordingRenderer::new();
    engine.draw(&mut game, &mut renderer).unwrap();
    assert!(renderer.has_text("PRESS ENTER TO START"));
}

#[test]
fn test_confirm_starts_round() {
    let (mut game, audio) = game(2);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();

    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));

    assert_eq!(game.state().status, GameStatus::Running);
    assert!(!engine.world().is_paused());
    assert_eq!(engine.world().len(), 9);
    assert_eq!(alive_of(engine.world(), SpriteKind::Asteroid(AsteroidSize::Big)), 8);
    assert_eq!(audio.count("loop music"), 1);
    assert_eq!(game.state().health, 20);
    assert_eq!(game.state().firepower, 2);
}

#[test]
fn test_round_keeps_running_over_many_ticks() {
    let (mut game, _audio) = game(3);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();
    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));

    let mut renderer = RecordingRenderer::new();
    for tick in 1..=120 {
        engine.tick(&mut game, tick * 16);
        engine.draw(&mut game, &mut renderer).unwrap();
    }

    assert_eq!(renderer.frames(), 120);
    assert!(renderer.image_count() > 0);
    assert!(engine.world().find(SpriteKind::Ship).is_some());
    for sprite in engine.world().alive() {
        let position = sprite.position();
        assert!(position.x > -100.0 && position.x < 900.0);
        assert!(position.y > -100.0 && position.y < 700.0);
    }
}

#[test]
fn test_restart_replaces_music() {
    let (mut game, audio) = game(8);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();

    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));
    game.handle_input(engine.world_mut(), &press(Keys::ESCAPE));
    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));

    let music: Vec<String> = audio
        .entries()
        .into_iter()
        .filter(|entry| entry.ends_with(" music"))
        .collect();
    assert_eq!(music, ["stop music", "loop music", "stop music", "loop music"]);
}

#[test]
fn test_escape_abandons_round() {
    let (mut game, _audio) = game(4);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();
    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));

    game.handle_input(engine.world_mut(), &press(Keys::ESCAPE));

    assert_eq!(game.state().status, GameStatus::Over);
    assert_eq!(engine.world().len(), 1);

    let mut renderer = RecordingRenderer::new();
    engine.draw(&mut game, &mut renderer).unwrap();
    assert!(renderer.has_text("GAME OVER"));
}

#[test]
fn test_clearing_the_field_wins() {
    let (mut game, _audio) = game(5);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();
    game.handle_input(engine.world_mut(), &press(Keys::CONFIRM));

    for sprite in engine.world_mut().iter_mut() {
        if sprite.kind().is_asteroid() {
            sprite.set_alive(false);
        }
    }
    game.timed_update(engine.world_mut());

    assert_eq!(game.state().status, GameStatus::Won);
    assert_eq!(engine.world().len(), 1);

    let mut renderer = RecordingRenderer::new();
    engine.draw(&mut game, &mut renderer).unwrap();
    assert!(renderer.has_text("GAME WON"));
}

#[test]
fn test_menu_never_counts_as_won() {
    let (mut game, _audio) = game(6);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();

    game.timed_update(engine.world_mut());
    assert_eq!(game.state().status, GameStatus::Menu);
}

#[test]
fn test_shutdown_stops_every_clip() {
    let (mut game, audio) = game(7);
    let mut engine = Engine::new(EngineConfig::default());
    engine.startup(&mut game, 0).unwrap();

    game.shutdown(engine.world_mut());
    assert_eq!(audio.count("stop music"), 1);
    assert_eq!(audio.count("stop shoot"), 1);
    assert_eq!(audio.count("stop explode"), 1);
}
