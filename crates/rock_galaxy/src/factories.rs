//! Sprite factories
//!
//! Pure constructors: they build a sprite from the assets, a random source
//! and the sprite it derives from, and leave adding it to the world (and
//! any sound) to the caller.

use crate::assets::{GameAssets, ImageRef};
use crate::components::{AsteroidSize, PowerupKind, SpriteKind};
use rand::Rng;
use sprite_engine::foundation::math::{heading, Vec2};
use sprite_engine::sprite::{Animation, Sprite, SpriteState};

/// Bullet speed in pixels per tick
pub const BULLET_SPEED: f64 = 4.0;
/// Bullet lifespan in ticks
pub const BULLET_LIFESPAN: u32 = 90;
/// Power-up lifespan in ticks
pub const POWERUP_LIFESPAN: u32 = 1500;
/// Power-up spin in degrees per tick
pub const POWERUP_ROTATION: f64 = 8.0;
/// Chance, in percent, that a tiny asteroid drops a power-up
pub const POWERUP_CHANCE: u32 = 24;
/// Margin kept free on the right and bottom when placing big asteroids
pub const SPAWN_MARGIN: i32 = 128;

/// Game sprite
pub type GameSprite = Sprite<SpriteKind>;

fn with_image(sprite: GameSprite, image: ImageRef) -> GameSprite {
    sprite.with_image(image.handle).with_size(image.width, image.height)
}

/// Random face angle, travel angle and spin, moving one pixel per tick
fn tumbling(sprite: GameSprite, rng: &mut impl Rng) -> GameSprite {
    let face = f64::from(rng.gen_range(0..360_i32));
    let travel = f64::from(rng.gen_range(0..360_i32));
    sprite
        .with_face_angle(face)
        .with_move_angle(travel)
        .with_rotation_rate(rng.gen::<f64>())
        .with_velocity(heading(travel - 90.0))
}

fn pick(variants: &[ImageRef], rng: &mut impl Rng) -> Option<ImageRef> {
    if variants.is_empty() {
        None
    } else {
        Some(variants[rng.gen_range(0..variants.len())])
    }
}

/// The player ship, invulnerable, with its top-left corner at `position`
pub fn ship(assets: &GameAssets, position: Vec2) -> GameSprite {
    with_image(Sprite::new(SpriteKind::Ship), assets.ship.normal)
        .with_position(position)
        .with_state(SpriteState::Exploding)
}

/// A bullet leaving `ship`'s centre, turned `spread` degrees off its nose
pub fn bullet(assets: &GameAssets, ship: &GameSprite, spread: f64) -> GameSprite {
    let face = ship.face_angle() + spread;
    let travel = face - 90.0;
    let half = Vec2::new(f64::from(assets.bullet.width / 2), f64::from(assets.bullet.height / 2));

    with_image(Sprite::new(SpriteKind::Bullet), assets.bullet)
        .with_lifespan(BULLET_LIFESPAN)
        .with_face_angle(face)
        .with_move_angle(travel)
        .with_velocity(heading(travel) * BULLET_SPEED)
        .with_position(ship.center() - half)
}

/// A big asteroid somewhere on a `width` x `height` field
pub fn big_asteroid(assets: &GameAssets, rng: &mut impl Rng, width: i32, height: i32) -> GameSprite {
    let mut sprite = Sprite::new(SpriteKind::Asteroid(AsteroidSize::Big));
    if let Some(image) = pick(assets.asteroid_variants(AsteroidSize::Big), rng) {
        sprite = with_image(sprite, image);
    }
    let x = rng.gen_range(0..(width - SPAWN_MARGIN).max(1));
    let y = rng.gen_range(0..(height - SPAWN_MARGIN).max(1));
    tumbling(sprite.with_position(Vec2::new(f64::from(x), f64::from(y))), rng)
}

/// A fragment of `parent`, one size smaller
///
/// Returns `None` for sizes that do not split.
pub fn fragment(assets: &GameAssets, rng: &mut impl Rng, parent: &GameSprite) -> Option<GameSprite> {
    let SpriteKind::Asteroid(size) = parent.kind() else {
        return None;
    };
    let smaller = size.split_into()?;

    let (width, height) = parent.size();
    let offset = Vec2::new(
        f64::from(width / 2 + rng.gen_range(0..20) - 40),
        f64::from(height / 2 + rng.gen_range(0..20) - 40),
    );

    let mut sprite = Sprite::new(SpriteKind::Asteroid(smaller));
    if let Some(image) = pick(assets.asteroid_variants(smaller), rng) {
        sprite = with_image(sprite, image);
    }
    Some(tumbling(sprite.with_position(parent.position() + offset), rng))
}

/// A spinning power-up where `parent` was, if the drop roll succeeds
pub fn powerup(assets: &GameAssets, rng: &mut impl Rng, parent: &GameSprite) -> Option<GameSprite> {
    if rng.gen_range(0..100) >= POWERUP_CHANCE {
        return None;
    }
    let kind = PowerupKind::ALL[rng.gen_range(0..PowerupKind::ALL.len())];
    let drift = Vec2::new(rng.gen::<f64>(), rng.gen::<f64>());

    Some(
        with_image(Sprite::new(SpriteKind::Powerup(kind)), assets.powerup(kind))
            .with_rotation_rate(POWERUP_ROTATION)
            .with_position(parent.position())
            .with_velocity(drift)
            .with_lifespan(POWERUP_LIFESPAN),
    )
}

/// The large explosion: 16 frames of 96x96
pub fn big_explosion(assets: &GameAssets, position: Vec2) -> GameSprite {
    Sprite::new(SpriteKind::Explosion)
        .with_image(assets.big_explosion.handle)
        .with_animation(Animation::new(16, 4, 96, 96, 2))
        .with_position(position)
}

/// The small explosion: 8 frames of 40x40
pub fn small_explosion(assets: &GameAssets, position: Vec2) -> GameSprite {
    Sprite::new(SpriteKind::Explosion)
        .with_image(assets.small_explosion.handle)
        .with_animation(Animation::new(8, 4, 40, 40, 2))
        .with_position(position)
}
