//! Gameplay rules
//!
//! Input application, collision reactions, asteroid splitting, firing and
//! the per-kind tick behaviour. Everything here runs inside an engine hook
//! and works on sprite indices into the [`World`].

use crate::components::{AsteroidSize, SpriteKind};
use crate::factories::{self, GameSprite};
use crate::game::RockGalaxy;
use crate::state::GameStatus;
use rand::Rng;
use sprite_engine::foundation::math::{heading, Vec2};
use sprite_engine::input::{InputState, Keys};
use sprite_engine::physics::CollisionPair;
use sprite_engine::sprite::{Animation, Sprite, SpriteState};
use sprite_engine::world::World;

/// Big asteroids per round
pub const ASTEROIDS: usize = 8;
/// Velocity gained per tick of thrust
pub const ACCELERATION: f64 = 0.05;
/// Degrees turned per tick
pub const SHIP_ROTATION: f64 = 5.0;
/// Limit on each velocity component
pub const MAX_VELOCITY: f64 = 5.0;
/// How long the ship ignores asteroids after a hit
pub const INVULNERABILITY_MILLIS: u64 = 3000;
/// Points per asteroid shot
pub const BULLET_HIT_POINTS: u32 = 5;
/// Pieces an asteroid breaks into
pub const FRAGMENTS: usize = 3;
/// The ship's explosion is drawn this far up and left of the ship
pub const EXPLOSION_OFFSET: f64 = 10.0;

/// Bullet angles relative to the ship's nose for a firepower level
pub fn spread(firepower: u32) -> &'static [f64] {
    match firepower {
        0 | 1 => &[0.0],
        2 => &[-4.0, 4.0],
        3 => &[-4.0, 0.0, 4.0],
        4 => &[-5.0, 5.0, -10.0, 10.0],
        _ => &[-6.0, 6.0, -15.0, 15.0, -60.0, 60.0],
    }
}

/// Accelerate along the facing direction, clamping each velocity component
pub fn apply_thrust(ship: &mut GameSprite) {
    ship.set_move_angle(ship.face_angle() - 90.0);
    let velocity = ship.velocity() + heading(ship.move_angle()) * ACCELERATION;
    ship.set_velocity(Vec2::new(
        velocity.x.clamp(-MAX_VELOCITY, MAX_VELOCITY),
        velocity.y.clamp(-MAX_VELOCITY, MAX_VELOCITY),
    ));
}

/// Re-enter from the opposite edge once fully off a `width` x `height` field
pub fn warp(sprite: &mut GameSprite, width: i32, height: i32) {
    let (w, h) = sprite.size();
    let margin_x = f64::from(w - 1);
    let margin_y = f64::from(h - 1);
    let mut position = sprite.position();

    if position.x < -margin_x {
        position.x = f64::from(width);
    } else if position.x > f64::from(width) {
        position.x = -margin_x;
    }
    if position.y < -margin_y {
        position.y = f64::from(height);
    } else if position.y > f64::from(height) {
        position.y = -margin_y;
    }
    sprite.set_position(position);
}

/// Keep a power-up's face angle within [10, 350] by reversing its spin
pub fn rock_back_and_forth(sprite: &mut GameSprite) {
    let face = sprite.face_angle();
    if face > 350.0 {
        sprite.set_rotation_rate(-sprite.rotation_rate());
        sprite.set_face_angle(350.0);
    } else if face < 10.0 {
        sprite.set_rotation_rate(-sprite.rotation_rate());
        sprite.set_face_angle(10.0);
    }
}

impl<R: Rng> RockGalaxy<R> {
    /// Translate one tick of input into control flags and one-shot actions
    pub fn handle_keys(&mut self, world: &mut World<SpriteKind>, input: &InputState) {
        let controls = &mut self.state.controls;
        controls.left = input.is_held(Keys::LEFT);
        controls.right = input.is_held(Keys::RIGHT);
        controls.thrust = input.is_held(Keys::THRUST);
        controls.fire = input.is_held(Keys::FIRE);
        if input.was_pressed(Keys::SHIELD) {
            controls.shield = !controls.thrust && self.state.shield > 0;
        }
        if input.was_released(Keys::SHIELD) {
            controls.shield = false;
        }

        if input.was_pressed(Keys::TOGGLE_BOUNDS) {
            self.state.show_bounds = !self.state.show_bounds;
        }
        if input.was_pressed(Keys::TOGGLE_COLLISION) {
            self.state.collision_testing = !self.state.collision_testing;
            log::info!("Collision reactions {}", if self.state.collision_testing { "on" } else { "off" });
        }

        if input.was_released(Keys::FIRE) && self.state.status == GameStatus::Running {
            self.fire_bullet(world);
        }

        if input.was_pressed(Keys::CONFIRM)
            && matches!(self.state.status, GameStatus::Menu | GameStatus::Over | GameStatus::Won)
        {
            self.reset_game(world);
            world.resume();
            self.set_status(GameStatus::Running);
        } else if input.was_pressed(Keys::ESCAPE) && self.state.status == GameStatus::Running {
            self.reset_ship(world);
            self.set_status(GameStatus::Over);
        }
    }

    /// Steer the ship from the held controls and pick its image
    pub fn check_input(&mut self, world: &mut World<SpriteKind>) {
        if self.state.status != GameStatus::Running {
            return;
        }
        let Some(ship) = world.find(SpriteKind::Ship).and_then(|index| world.get_mut(index)) else {
            return;
        };

        let controls = self.state.controls;
        if controls.left {
            ship.set_face_angle(ship.face_angle() - SHIP_ROTATION);
        } else if controls.right {
            ship.set_face_angle(ship.face_angle() + SHIP_ROTATION);
        }

        let image = if controls.thrust {
            apply_thrust(ship);
            self.assets.ship.thrust
        } else if controls.shield {
            self.assets.ship.shield
        } else {
            self.assets.ship.normal
        };
        ship.set_image(Some(image.handle));
        ship.set_size(image.width, image.height);
    }

    /// Fire a volley from the ship; returns the number of bullets spawned
    pub fn fire_bullet(&mut self, world: &mut World<SpriteKind>) -> usize {
        let Some(ship) = world.find(SpriteKind::Ship).and_then(|index| world.get(index)) else {
            return 0;
        };
        let bullets: Vec<GameSprite> = spread(self.state.firepower)
            .iter()
            .map(|offset| factories::bullet(&self.assets, ship, *offset))
            .collect();

        let count = bullets.len();
        for bullet in bullets {
            world.add(bullet);
        }
        self.audio.play(&self.sounds.shoot, false);
        count
    }

    /// Start a new round: music, a fresh ship, eight big asteroids, full bars
    pub fn reset_game(&mut self, world: &mut World<SpriteKind>) {
        self.audio.stop(&self.sounds.music);
        self.audio.play(&self.sounds.music, true);
        self.reset_ship(world);
        for _ in 0..ASTEROIDS {
            let asteroid = factories::big_asteroid(&self.assets, &mut self.rng, self.width, self.height);
            world.add(asteroid);
        }
        self.state.reset_round();
    }

    /// Empty the world and put an invulnerable ship back in the centre
    pub fn reset_ship(&mut self, world: &mut World<SpriteKind>) {
        world.clear();
        world.add(factories::ship(&self.assets, self.screen_centre()));
        self.state.collision_timer = world.now_millis();
    }

    /// Per-kind behaviour after a sprite moved
    pub fn update_sprite(&mut self, world: &mut World<SpriteKind>, index: usize) {
        let (width, height) = (self.width, self.height);
        let Some(sprite) = world.get_mut(index) else {
            return;
        };
        match sprite.kind() {
            SpriteKind::Ship | SpriteKind::Bullet | SpriteKind::Asteroid(_) => warp(sprite, width, height),
            SpriteKind::Explosion => {
                if sprite.animation().is_some_and(Animation::is_last_frame) {
                    sprite.set_alive(false);
                }
            }
            SpriteKind::Powerup(_) => {
                warp(sprite, width, height);
                rock_back_and_forth(sprite);
            }
        }
    }

    /// React to sprite `pair.a` touching sprite `pair.b`
    pub fn react(&mut self, world: &mut World<SpriteKind>, pair: CollisionPair) {
        let (Some(first), Some(second)) = (world.get(pair.a).map(Sprite::kind), world.get(pair.b).map(Sprite::kind))
        else {
            return;
        };

        match first {
            SpriteKind::Bullet => {
                if second.is_asteroid() {
                    self.state.bump_score(BULLET_HIT_POINTS);
                    kill(world, pair.a);
                    kill(world, pair.b);
                    self.break_asteroid(world, pair.b);
                }
            }
            SpriteKind::Ship => {
                if second.is_asteroid() {
                    self.ship_struck(world, pair);
                }
            }
            SpriteKind::Powerup(kind) => {
                if second == SpriteKind::Ship {
                    self.state.apply_powerup(kind);
                    kill(world, pair.a);
                }
            }
            SpriteKind::Asteroid(_) | SpriteKind::Explosion => {}
        }
    }

    fn ship_struck(&mut self, world: &mut World<SpriteKind>, pair: CollisionPair) {
        let now = world.now_millis();
        let Some(ship) = world.get_mut(pair.a) else {
            return;
        };

        match ship.state() {
            SpriteState::Normal => {
                let mut explosion_at = None;
                if self.state.shield_up() {
                    self.state.absorb_hit();
                    log::debug!("Shield absorbed a hit, {} left", self.state.shield);
                } else {
                    self.state.collision_timer = now;
                    ship.set_velocity(Vec2::zeros());
                    ship.set_state(SpriteState::Exploding);
                    explosion_at = Some(ship.position() - Vec2::new(EXPLOSION_OFFSET, EXPLOSION_OFFSET));
                    self.state.take_hit();
                    log::info!("Ship hit, health {}", self.state.health);
                }

                if let Some(position) = explosion_at {
                    self.start_explosion(world, position, true);
                }
                kill(world, pair.b);
                self.break_asteroid(world, pair.b);
            }
            SpriteState::Exploding => {
                if self.state.collision_timer + INVULNERABILITY_MILLIS < now {
                    ship.set_state(SpriteState::Normal);
                }
            }
            SpriteState::Collided => {}
        }
    }

    /// Replace the asteroid at `index` by its fragments (or a possible
    /// power-up for tiny ones) and an explosion
    pub fn break_asteroid(&mut self, world: &mut World<SpriteKind>, index: usize) {
        let Some(parent) = world.get(index).cloned() else {
            return;
        };
        let SpriteKind::Asteroid(size) = parent.kind() else {
            return;
        };

        if size == AsteroidSize::Tiny {
            if let Some(powerup) = factories::powerup(&self.assets, &mut self.rng, &parent) {
                log::debug!("Dropped {:?}", powerup.kind());
                world.add(powerup);
            }
        } else {
            for _ in 0..FRAGMENTS {
                if let Some(piece) = factories::fragment(&self.assets, &mut self.rng, &parent) {
                    world.add(piece);
                }
            }
        }

        self.start_explosion(world, parent.position(), size.big_explosion());
    }

    fn start_explosion(&mut self, world: &mut World<SpriteKind>, position: Vec2, big: bool) {
        let explosion = if big {
            factories::big_explosion(&self.assets, position)
        } else {
            factories::small_explosion(&self.assets, position)
        };
        world.add(explosion);
        self.audio.play(&self.sounds.explosion, false);
    }
}

fn kill(world: &mut World<SpriteKind>, index: usize) {
    if let Some(sprite) = world.get_mut(index) {
        sprite.set_alive(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rock(x: f64, y: f64) -> GameSprite {
        Sprite::new(SpriteKind::Asteroid(AsteroidSize::Big))
            .with_position(Vec2::new(x, y))
            .with_size(40, 30)
    }

    #[test]
    fn test_spread_table() {
        assert_eq!(spread(1), &[0.0]);
        assert_eq!(spread(3), &[-4.0, 0.0, 4.0]);
        assert_eq!(spread(4).len(), 4);
        assert_eq!(spread(5), &[-6.0, 6.0, -15.0, 15.0, -60.0, 60.0]);
    }

    #[test]
    fn test_thrust_clamps_each_component() {
        let mut ship = Sprite::new(SpriteKind::Ship)
            .with_face_angle(90.0)
            .with_velocity(Vec2::new(4.99, 3.0));
        apply_thrust(&mut ship);
        assert_relative_eq!(ship.move_angle(), 0.0);
        assert_relative_eq!(ship.velocity().x, MAX_VELOCITY);
        assert_relative_eq!(ship.velocity().y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thrust_accumulates() {
        let mut ship = Sprite::new(SpriteKind::Ship);
        for _ in 0..10 {
            apply_thrust(&mut ship);
        }
        assert_relative_eq!(ship.velocity().y, -0.5, epsilon = 1e-9);
        assert_relative_eq!(ship.velocity().x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_warp_wraps_both_axes() {
        let mut sprite = rock(-40.0, 601.0);
        warp(&mut sprite, 800, 600);
        assert_relative_eq!(sprite.position().x, 800.0);
        assert_relative_eq!(sprite.position().y, -29.0);

        let mut sprite = rock(801.0, -30.0);
        warp(&mut sprite, 800, 600);
        assert_relative_eq!(sprite.position().x, -39.0);
        assert_relative_eq!(sprite.position().y, 600.0);

        let mut sprite = rock(-39.0, 0.0);
        warp(&mut sprite, 800, 600);
        assert_relative_eq!(sprite.position().x, -39.0);
    }

    #[test]
    fn test_powerup_spin_reverses_at_bounds() {
        let mut sprite = Sprite::new(SpriteKind::Ship)
            .with_face_angle(352.0)
            .with_rotation_rate(8.0);
        rock_back_and_forth(&mut sprite);
        assert_relative_eq!(sprite.face_angle(), 350.0);
        assert_relative_eq!(sprite.rotation_rate(), -8.0);

        sprite.set_face_angle(4.0);
        rock_back_and_forth(&mut sprite);
        assert_relative_eq!(sprite.face_angle(), 10.0);
        assert_relative_eq!(sprite.rotation_rate(), 8.0);
    }
}
