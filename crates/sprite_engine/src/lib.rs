//! # Sprite Engine
//!
//! A small 2D sprite engine: a fixed-tick loop, a live sprite collection,
//! first-match bounding-box collisions and the seams a frontend plugs into.
//!
//! ## Features
//!
//! - **Fixed-tick loop**: update, collide, timed update, redraw
//! - **Flat sprites**: kinematics plus an optional animation component
//! - **Game-defined kinds**: sprites are generic over the game's kind enum
//! - **Collaborator traits**: rendering, audio, input and image loading
//!   are supplied by the frontend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//!
//! #[derive(Clone, Copy, PartialEq)]
//! enum Kind { Player }
//!
//! struct MyGame;
//!
//! impl Application<Kind> for MyGame {
//!     fn startup(&mut self, world: &mut World<Kind>) -> Result<(), AppError> {
//!         world.add(Sprite::new(Kind::Player).with_size(16, 16));
//!         Ok(())
//!     }
//!
//!     fn timed_update(&mut self, _world: &mut World<Kind>) {}
//!
//!     fn sprite_collision(&mut self, _world: &mut World<Kind>, _pair: CollisionPair) {}
//!
//!     fn refresh_screen(&mut self, _world: &World<Kind>, _renderer: &mut dyn Renderer) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default());
//!     let mut input = ScriptedInput::default();
//!     let mut renderer = RecordingRenderer::new();
//!     engine.run(&mut MyGame, &mut input, &mut renderer, &SystemClock::new())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod sprite;
pub mod world;
pub mod assets;
pub mod render;
pub mod input;
pub mod audio;
pub mod physics;
pub mod config;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError, StopHandle, TickSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Application,
        Engine, EngineConfig, EngineError,
        foundation::{
            math::{heading, normalize_degrees, Rect, Vec2},
            time::{Clock, ManualClock, SystemClock},
        },
        sprite::{Animation, Sprite, SpriteState},
        world::World,
        physics::CollisionPair,
        assets::{ImageHandle, ResourceLoader},
        render::{Color, RecordingRenderer, RenderError, Renderer, TextStyle},
        input::{InputSource, InputState, Keys, ScriptedInput},
        audio::{AudioPlayer, ClipId, NullAudio},
        config::Config,
    };
}
