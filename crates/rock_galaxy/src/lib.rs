//! # Rock Galaxy
//!
//! An arcade asteroid shooter on top of `sprite_engine`. The ship turns,
//! thrusts and fires at big asteroids that split into smaller ones; tiny
//! asteroids sometimes leave power-ups behind.
//!
//! The crate holds the gameplay only. Frontends supply the engine's
//! collaborator traits; the `rock_galaxy` binary ships a terminal one.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod components;
pub mod config;
pub mod factories;
pub mod game;
pub mod hud;
pub mod rules;
pub mod state;

pub use components::{AsteroidSize, PowerupKind, SpriteKind};
pub use config::GameConfig;
pub use game::RockGalaxy;
pub use state::{GameState, GameStatus};
