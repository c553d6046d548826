//! Score, health and the round state machine

use crate::components::PowerupKind;

/// Health and shield ceiling
pub const MAX_HEALTH: i32 = 20;
/// Shield ceiling
pub const MAX_SHIELD: i32 = 20;
/// Firepower floor
pub const MIN_FIREPOWER: u32 = 1;
/// Firepower ceiling
pub const MAX_FIREPOWER: u32 = 5;
/// Health lost per unshielded asteroid hit
pub const HIT_DAMAGE: i32 = 2;
/// Health or shield restored by a power-up
pub const POWERUP_BOOST: i32 = 5;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Title screen, world paused
    #[default]
    Menu,
    /// Playing
    Running,
    /// Health dropped below zero or the round was abandoned
    Over,
    /// Every asteroid destroyed
    Won,
}

/// Control flags derived from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    /// Rotating counter-clockwise
    pub left: bool,
    /// Rotating clockwise
    pub right: bool,
    /// Thrusting
    pub thrust: bool,
    /// Fire key down
    pub fire: bool,
    /// Shield raised
    pub shield: bool,
}

/// Everything about a round that is not a sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Ship health; drops below zero on the fatal hit
    pub health: i32,
    /// Shield charge
    pub shield: i32,
    /// Current score
    pub score: u32,
    /// Best score this session
    pub highscore: u32,
    /// Bullet spread level
    pub firepower: u32,
    /// Current screen
    pub status: GameStatus,
    /// Tick clock value when the ship last became invulnerable
    pub collision_timer: u64,
    /// Keyboard-driven flags
    pub controls: Controls,
    /// Draw bounding boxes
    pub show_bounds: bool,
    /// Dispatch collision reactions
    pub collision_testing: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            shield: MAX_SHIELD,
            score: 0,
            highscore: 0,
            firepower: MIN_FIREPOWER,
            status: GameStatus::Menu,
            collision_timer: 0,
            controls: Controls::default(),
            show_bounds: false,
            collision_testing: true,
        }
    }
}

impl GameState {
    /// Start a fresh round's statistics; the high score survives
    pub fn reset_round(&mut self) {
        self.health = MAX_HEALTH;
        self.shield = MAX_SHIELD;
        self.score = 0;
        self.firepower = 2;
    }

    /// Add points, raising the high score when beaten
    pub fn bump_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        if self.score > self.highscore {
            self.highscore = self.score;
        }
    }

    /// Whether a raised shield currently absorbs hits
    pub fn shield_up(&self) -> bool {
        self.controls.shield && self.shield > 0
    }

    /// Absorb a hit with the shield
    pub fn absorb_hit(&mut self) {
        self.shield = (self.shield - 1).max(0);
    }

    /// Take an unshielded hit; returns `true` when it was fatal
    pub fn take_hit(&mut self) -> bool {
        self.health -= HIT_DAMAGE;
        self.firepower = self.firepower.saturating_sub(1).max(MIN_FIREPOWER);
        if self.health < 0 {
            log::info!("Ship destroyed, final score {}", self.score);
            self.status = GameStatus::Over;
            true
        } else {
            false
        }
    }

    /// Apply a collected power-up
    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Shield => self.shield = (self.shield + POWERUP_BOOST).min(MAX_SHIELD),
            PowerupKind::Health => self.health = (self.health + POWERUP_BOOST).min(MAX_HEALTH),
            PowerupKind::Gun => self.firepower = (self.firepower + 1).min(MAX_FIREPOWER),
            PowerupKind::Points250 | PowerupKind::Points500 | PowerupKind::Points1000 => {
                self.bump_score(kind.points().unwrap_or_default());
            }
        }
        log::debug!("Picked up {:?}", kind);
    }
}
