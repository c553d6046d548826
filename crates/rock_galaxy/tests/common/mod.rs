//! Shared fixtures for the gameplay tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rock_galaxy::assets::GameAssets;
use rock_galaxy::{GameConfig, GameStatus, RockGalaxy, SpriteKind};
use sprite_engine::assets::FsImageLoader;
use sprite_engine::audio::{AudioPlayer, ClipId};
use sprite_engine::foundation::math::Vec2;
use sprite_engine::sprite::{Sprite, SpriteState};
use sprite_engine::world::World;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Clip plays and stops seen by the game, shared with the test
#[derive(Debug, Default, Clone)]
pub struct AudioLog(Rc<RefCell<Vec<String>>>);

impl AudioLog {
    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|seen| seen.as_str() == entry).count()
    }

    /// Every entry, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

struct RecordingAudio(AudioLog);

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, clip: &ClipId, looping: bool) {
        let entry = if looping { format!("loop {clip}") } else { format!("play {clip}") };
        (self.0).0.borrow_mut().push(entry);
    }

    fn stop(&mut self, clip: &ClipId) {
        (self.0).0.borrow_mut().push(format!("stop {clip}"));
    }
}

/// A game on placeholder images with a seeded generator
pub fn game(seed: u64) -> (RockGalaxy<StdRng>, AudioLog) {
    let mut loader = FsImageLoader::new(Vec::new());
    let assets = GameAssets::load(&mut loader, Path::new("missing/images"));
    let log = AudioLog::default();
    let game = RockGalaxy::new(
        &GameConfig::default(),
        assets,
        Box::new(RecordingAudio(log.clone())),
        StdRng::seed_from_u64(seed),
    );
    (game, log)
}

/// A running game whose world holds only a vulnerable ship at (100, 100)
pub fn running_with_ship(seed: u64) -> (RockGalaxy<StdRng>, AudioLog, World<SpriteKind>, usize) {
    let (mut game, log) = game(seed);
    game.state_mut().reset_round();
    game.state_mut().status = GameStatus::Running;

    let mut world = World::new();
    let ship = rock_galaxy::factories::ship(game.assets(), Vec2::new(100.0, 100.0));
    let ship = world.add(ship.with_state(SpriteState::Normal));
    (game, log, world, ship)
}

pub fn asteroid(game: &RockGalaxy<StdRng>, size: rock_galaxy::AsteroidSize, at: Vec2) -> Sprite<SpriteKind> {
    let image = game.assets().asteroid_variants(size)[0];
    Sprite::new(SpriteKind::Asteroid(size))
        .with_image(image.handle)
        .with_size(image.width, image.height)
        .with_position(at)
}

pub fn alive_of(world: &World<SpriteKind>, kind: SpriteKind) -> usize {
    world.alive().filter(|sprite| sprite.kind() == kind).count()
}
