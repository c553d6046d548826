//! The game as an engine application

use crate::assets::{GameAssets, Sounds};
use crate::components::SpriteKind;
use crate::config::GameConfig;
use crate::hud;
use crate::state::{GameState, GameStatus};
use rand::Rng;
use sprite_engine::audio::AudioPlayer;
use sprite_engine::foundation::math::Vec2;
use sprite_engine::input::InputState;
use sprite_engine::physics::CollisionPair;
use sprite_engine::render::{Color, RenderError, Renderer};
use sprite_engine::world::World;
use sprite_engine::{AppError, Application};

/// Rock Galaxy gameplay
pub struct RockGalaxy<R> {
    pub(crate) state: GameState,
    pub(crate) assets: GameAssets,
    pub(crate) sounds: Sounds,
    pub(crate) audio: Box<dyn AudioPlayer>,
    pub(crate) rng: R,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl<R: Rng> RockGalaxy<R> {
    /// Create the game with its collaborators
    pub fn new(config: &GameConfig, assets: GameAssets, audio: Box<dyn AudioPlayer>, rng: R) -> Self {
        let state = GameState {
            show_bounds: config.debug.show_bounds,
            collision_testing: config.debug.collision_testing,
            ..GameState::default()
        };
        Self {
            state,
            assets,
            sounds: Sounds::default(),
            audio,
            rng,
            width: config.window.width,
            height: config.window.height,
        }
    }

    /// Round statistics and flags
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable round statistics and flags
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Loaded images
    pub fn assets(&self) -> &GameAssets {
        &self.assets
    }

    /// Playfield size in pixels
    pub fn screen_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Where the ship is placed on reset
    pub(crate) fn screen_centre(&self) -> Vec2 {
        Vec2::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        if self.state.status != status {
            log::info!("Game state {:?} -> {:?}", self.state.status, status);
            self.state.status = status;
        }
    }
}

impl<R: Rng> Application<SpriteKind> for RockGalaxy<R> {
    fn startup(&mut self, world: &mut World<SpriteKind>) -> Result<(), AppError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(AppError::GameLogic(format!(
                "playfield must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        let ship = crate::factories::ship(&self.assets, self.screen_centre());
        world.add(ship);
        self.state.collision_timer = world.now_millis();
        world.pause();
        self.state.status = GameStatus::Menu;
        log::info!("Rock Galaxy ready ({}x{})", self.width, self.height);
        Ok(())
    }

    fn handle_input(&mut self, world: &mut World<SpriteKind>, input: &InputState) {
        self.handle_keys(world, input);
    }

    fn timed_update(&mut self, world: &mut World<SpriteKind>) {
        self.check_input(world);

        if self.state.status == GameStatus::Running
            && !world.is_paused()
            && world.alive_count() == 1
            && world.find(SpriteKind::Ship).is_some()
        {
            self.reset_ship(world);
            self.set_status(GameStatus::Won);
        }
    }

    fn sprite_update(&mut self, world: &mut World<SpriteKind>, index: usize) {
        self.update_sprite(world, index);
    }

    fn sprite_collision(&mut self, world: &mut World<SpriteKind>, pair: CollisionPair) {
        if self.state.collision_testing {
            self.react(world, pair);
        }
    }

    fn refresh_screen(&mut self, _world: &World<SpriteKind>, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        hud::draw_screen(renderer, &self.state, &self.assets, self.width, self.height)
    }

    fn sprite_draw(
        &mut self,
        world: &World<SpriteKind>,
        index: usize,
        renderer: &mut dyn Renderer,
    ) -> Result<(), RenderError> {
        if !self.state.show_bounds {
            return Ok(());
        }
        match world.get(index) {
            Some(sprite) => {
                let color = if sprite.has_collided() { Color::RED } else { Color::BLUE };
                renderer.draw_rect(sprite.bounds(), color, false)
            }
            None => Ok(()),
        }
    }

    fn shutdown(&mut self, _world: &mut World<SpriteKind>) {
        for clip in self.sounds.all() {
            self.audio.stop(clip);
        }
        log::info!("Rock Galaxy shut down, high score {}", self.state.highscore);
    }
}
