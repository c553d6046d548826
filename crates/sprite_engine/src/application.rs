//! Application trait and lifecycle hooks

use crate::{
    assets::AssetError,
    audio::AudioError,
    config::ConfigError,
    input::InputState,
    physics::CollisionPair,
    render::{RenderError, Renderer},
    world::World,
};
use thiserror::Error;

/// Game lifecycle trait
///
/// Implement this to plug a game into the [`Engine`](crate::Engine). The
/// engine owns the [`World`]; every hook borrows it for the duration of
/// the call. Sprites are addressed by index, which stays valid until the
/// next purge.
pub trait Application<K: Copy> {
    /// Called once before the first tick
    fn startup(&mut self, world: &mut World<K>) -> Result<(), AppError>;

    /// Called once per tick with the input polled for that tick, before
    /// any sprite moves
    fn handle_input(&mut self, _world: &mut World<K>, _input: &InputState) {}

    /// Called every tick after sprite updates and collisions, even while
    /// the world is paused
    fn timed_update(&mut self, world: &mut World<K>);

    /// Called for each live sprite after it moved, rotated and animated
    fn sprite_update(&mut self, _world: &mut World<K>, _index: usize) {}

    /// Called when a sprite dies during its own update
    fn sprite_dying(&mut self, _world: &mut World<K>, _index: usize) {}

    /// Called for each collision the sweep dispatches
    fn sprite_collision(&mut self, world: &mut World<K>, pair: CollisionPair);

    /// Draw the background and overlays; runs first in every frame
    fn refresh_screen(&mut self, world: &World<K>, renderer: &mut dyn Renderer) -> Result<(), RenderError>;

    /// Draw extras for one sprite, right after its image
    fn sprite_draw(
        &mut self,
        _world: &World<K>,
        _index: usize,
        _renderer: &mut dyn Renderer,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called once after the last tick
    fn shutdown(&mut self, _world: &mut World<K>) {}

    /// Polled after every tick; `true` stops the loop
    fn wants_quit(&self) -> bool {
        false
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Audio error
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
