//! Collision detection between sprites
//!
//! Axis-aligned bounding boxes only; no response physics beyond what the
//! game's reaction callback chooses to do.

pub mod collision_system;

pub use collision_system::{detect_collisions, CollisionPair};
