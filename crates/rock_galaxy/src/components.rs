//! Sprite kinds
//!
//! Every sprite in the world carries one of these tags; the collision
//! reactions and per-tick rules match on them exhaustively.

/// What a sprite is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// The player ship
    Ship,
    /// A plasma shot
    Bullet,
    /// A rock of some size
    Asteroid(AsteroidSize),
    /// A one-shot explosion animation
    Explosion,
    /// A pickup dropped by a tiny asteroid
    Powerup(PowerupKind),
}

impl SpriteKind {
    /// Whether this is an asteroid of any size
    pub fn is_asteroid(self) -> bool {
        matches!(self, Self::Asteroid(_))
    }

    /// Whether this is a power-up of any kind
    pub fn is_powerup(self) -> bool {
        matches!(self, Self::Powerup(_))
    }

    /// Whether the sprite re-enters from the opposite edge when it leaves
    /// the screen
    pub fn wraps_around(self) -> bool {
        !matches!(self, Self::Explosion)
    }
}

/// Asteroid size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    /// Spawned at round start, splits into medium
    Big,
    /// Splits into small
    Medium,
    /// Splits into tiny
    Small,
    /// May drop a power-up
    Tiny,
}

impl AsteroidSize {
    /// Get the next smaller size when split
    pub fn split_into(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Big => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => Some(AsteroidSize::Tiny),
            AsteroidSize::Tiny => None,
        }
    }

    /// Whether breaking this size shows the large explosion
    pub fn big_explosion(self) -> bool {
        self == AsteroidSize::Big
    }
}

/// Power-up variants, dropped with equal probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// +5 shield
    Shield,
    /// +5 health
    Health,
    /// +250 points
    Points250,
    /// +500 points
    Points500,
    /// +1000 points
    Points1000,
    /// +1 firepower
    Gun,
}

impl PowerupKind {
    /// Every variant, in drop-table order
    pub const ALL: [PowerupKind; 6] = [
        PowerupKind::Shield,
        PowerupKind::Health,
        PowerupKind::Points250,
        PowerupKind::Points500,
        PowerupKind::Points1000,
        PowerupKind::Gun,
    ];

    /// Points awarded on pickup, if this is a score power-up
    pub fn points(self) -> Option<u32> {
        match self {
            PowerupKind::Points250 => Some(250),
            PowerupKind::Points500 => Some(500),
            PowerupKind::Points1000 => Some(1000),
            PowerupKind::Shield | PowerupKind::Health | PowerupKind::Gun => None,
        }
    }
}
