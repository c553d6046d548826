//! Sprite model
//!
//! A [`Sprite`] is an [`Entity`] plus everything the loop needs to
//! update and collide it: a kind tag supplied by the game, a state, a
//! collision flag, a lifespan, a rotation rate, bounding dimensions, an
//! optional image handle and an optional [`Animation`] component.

pub mod animation;
pub mod entity;

pub use animation::Animation;
pub use entity::Entity;

use crate::assets::ImageHandle;
use crate::foundation::math::{Rect, Vec2};

/// Behavioural state of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteState {
    /// Default state
    #[default]
    Normal,

    /// Hit this frame
    Collided,

    /// Exploding; for the player ship this doubles as invulnerable
    Exploding,
}

/// A positioned, collidable, drawable game object tagged with a kind `K`
#[derive(Debug, Clone)]
pub struct Sprite<K> {
    entity: Entity,
    kind: K,
    state: SpriteState,
    collided: bool,
    rotation_rate: f64,
    lifespan: u32,
    lifeage: u32,
    width: i32,
    height: i32,
    image: Option<ImageHandle>,
    animation: Option<Animation>,
}

impl<K: Copy> Sprite<K> {
    /// Create a live sprite of the given kind at the origin
    pub fn new(kind: K) -> Self {
        let mut entity = Entity::new();
        entity.set_alive(true);
        Self {
            entity,
            kind,
            state: SpriteState::Normal,
            collided: false,
            rotation_rate: 0.0,
            lifespan: 0,
            lifeage: 0,
            width: 0,
            height: 0,
            image: None,
            animation: None,
        }
    }

    // -- builders -----------------------------------------------------------

    /// Place the sprite
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.entity.set_position(position);
        self
    }

    /// Give the sprite a velocity
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.entity.set_velocity(velocity);
        self
    }

    /// Set the facing angle in degrees
    #[must_use]
    pub fn with_face_angle(mut self, degrees: f64) -> Self {
        self.entity.set_face_angle(degrees);
        self
    }

    /// Set the travel angle in degrees
    #[must_use]
    pub fn with_move_angle(mut self, degrees: f64) -> Self {
        self.entity.set_move_angle(degrees);
        self
    }

    /// Degrees added to the facing angle every tick
    #[must_use]
    pub fn with_rotation_rate(mut self, degrees_per_tick: f64) -> Self {
        self.rotation_rate = degrees_per_tick;
        self
    }

    /// Maximum age in ticks (0 = lives forever)
    #[must_use]
    pub fn with_lifespan(mut self, ticks: u32) -> Self {
        self.lifespan = ticks;
        self
    }

    /// Bounding dimensions
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Image drawn for this sprite (a sprite sheet when animated)
    #[must_use]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    /// Initial state
    #[must_use]
    pub fn with_state(mut self, state: SpriteState) -> Self {
        self.state = state;
        self
    }

    /// Attach an animation; the bounding box becomes one sheet cell
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.width = animation.frame_width;
        self.height = animation.frame_height;
        self.animation = Some(animation);
        self
    }

    // -- accessors ----------------------------------------------------------

    /// Kind tag
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Kinematic state
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.entity.position()
    }

    /// Move the sprite
    pub fn set_position(&mut self, position: Vec2) {
        self.entity.set_position(position);
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.entity.velocity()
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.entity.set_velocity(velocity);
    }

    /// Facing angle in `[0, 360)`
    pub fn face_angle(&self) -> f64 {
        self.entity.face_angle()
    }

    /// Set the facing angle
    pub fn set_face_angle(&mut self, degrees: f64) {
        self.entity.set_face_angle(degrees);
    }

    /// Travel angle in `[0, 360)`
    pub fn move_angle(&self) -> f64 {
        self.entity.move_angle()
    }

    /// Set the travel angle
    pub fn set_move_angle(&mut self, degrees: f64) {
        self.entity.set_move_angle(degrees);
    }

    /// Whether the sprite still takes part in the loop
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Mark alive or dead; dead sprites are purged later
    pub fn set_alive(&mut self, alive: bool) {
        self.entity.set_alive(alive);
    }

    /// Current state
    pub fn state(&self) -> SpriteState {
        self.state
    }

    /// Change state
    pub fn set_state(&mut self, state: SpriteState) {
        self.state = state;
    }

    /// Whether the last collision sweep matched this sprite
    pub fn has_collided(&self) -> bool {
        self.collided
    }

    /// Set the collision flag
    pub fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    /// Degrees added to the facing angle per tick
    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    /// Change the rotation rate
    pub fn set_rotation_rate(&mut self, degrees_per_tick: f64) {
        self.rotation_rate = degrees_per_tick;
    }

    /// Maximum age in ticks (0 = infinite)
    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Ticks lived so far
    pub fn lifeage(&self) -> u32 {
        self.lifeage
    }

    /// Bounding width and height
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Change the bounding dimensions
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Image handle, if any
    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    /// Swap the image (e.g. ship thrust/shield variants)
    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        self.image = image;
    }

    /// Animation component, if any
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Mutable animation component, if any
    pub fn animation_mut(&mut self) -> Option<&mut Animation> {
        self.animation.as_mut()
    }

    // -- per-tick updates ---------------------------------------------------

    /// Move by one tick of velocity
    pub fn update_position(&mut self) {
        self.entity.update_position();
    }

    /// Spin by the rotation rate
    pub fn update_rotation(&mut self) {
        let angle = self.entity.face_angle() + self.rotation_rate;
        self.entity.set_face_angle(angle);
    }

    /// Step the animation component, if present
    pub fn update_animation(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            animation.advance();
        }
    }

    /// Age one tick; past its lifespan the sprite dies
    pub fn update_lifetime(&mut self) {
        if self.lifespan > 0 {
            self.lifeage += 1;
            if self.lifeage > self.lifespan {
                self.set_alive(false);
                self.lifeage = 0;
            }
        }
    }

    // -- geometry -----------------------------------------------------------

    /// Bounding box at the current position
    pub fn bounds(&self) -> Rect {
        let position = self.position();
        Rect::new(position.x as i32, position.y as i32, self.width, self.height)
    }

    /// Centre of the bounding box
    pub fn center(&self) -> Vec2 {
        self.position() + Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Whether the bounding boxes overlap
    pub fn collides_with(&self, other: &Sprite<K>) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Whether the point lies inside the bounding box
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Rock,
    }

    #[test]
    fn test_new_sprite_is_alive_and_normal() {
        let sprite = Sprite::new(Kind::Rock);
        assert!(sprite.is_alive());
        assert_eq!(sprite.state(), SpriteState::Normal);
        assert!(!sprite.has_collided());
        assert_eq!(sprite.kind(), Kind::Rock);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut sprite = Sprite::new(Kind::Rock).with_face_angle(355.0).with_rotation_rate(10.0);
        sprite.update_rotation();
        assert_relative_eq!(sprite.face_angle(), 5.0);
        sprite.set_rotation_rate(-10.0);
        sprite.update_rotation();
        sprite.update_rotation();
        assert_relative_eq!(sprite.face_angle(), 345.0);
    }

    #[test]
    fn test_lifetime_expires_after_lifespan() {
        let mut sprite = Sprite::new(Kind::Rock).with_lifespan(3);
        for _ in 0..3 {
            sprite.update_lifetime();
            assert!(sprite.is_alive());
        }
        sprite.update_lifetime();
        assert!(!sprite.is_alive());
        assert_eq!(sprite.lifeage(), 0);
    }

    #[test]
    fn test_infinite_lifetime() {
        let mut sprite = Sprite::new(Kind::Rock);
        for _ in 0..10_000 {
            sprite.update_lifetime();
        }
        assert!(sprite.is_alive());
        assert_eq!(sprite.lifeage(), 0);
    }

    #[test]
    fn test_bounds_and_center() {
        let sprite = Sprite::new(Kind::Rock)
            .with_position(Vec2::new(10.7, 20.2))
            .with_size(30, 40);
        assert_eq!(sprite.bounds(), Rect::new(10, 20, 30, 40));
        assert_relative_eq!(sprite.center().x, 25.7);
        assert_relative_eq!(sprite.center().y, 40.2);
        assert!(sprite.contains_point(Vec2::new(11.0, 21.0)));
    }

    #[test]
    fn test_animation_sets_bounds() {
        let sprite = Sprite::new(Kind::Rock).with_animation(Animation::new(8, 4, 40, 40, 2));
        assert_eq!(sprite.size(), (40, 40));
    }

    #[test]
    fn test_collides_with() {
        let a = Sprite::new(Kind::Rock).with_size(10, 10);
        let b = Sprite::new(Kind::Rock).with_position(Vec2::new(9.0, 9.0)).with_size(10, 10);
        let c = Sprite::new(Kind::Rock).with_position(Vec2::new(10.0, 0.0)).with_size(10, 10);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
        assert!(!a.collides_with(&c));
    }
}
