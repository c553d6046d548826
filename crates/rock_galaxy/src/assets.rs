//! Game asset definitions
//!
//! Images are requested through the engine's [`ResourceLoader`]; each
//! request carries the size the sprite should have if the file is missing,
//! so the game stays playable without its resource folder.

use crate::components::{AsteroidSize, PowerupKind};
use sprite_engine::assets::{ImageHandle, ResourceLoader};
use sprite_engine::audio::ClipId;
use std::path::{Path, PathBuf};

/// A loaded image and its dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef {
    /// Engine handle
    pub handle: ImageHandle,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

/// The three looks of the player ship
#[derive(Debug, Clone, Copy)]
pub struct ShipImages {
    /// Idle
    pub normal: ImageRef,
    /// Thrusting
    pub thrust: ImageRef,
    /// Shield raised
    pub shield: ImageRef,
}

/// Every image the game draws
#[derive(Debug, Clone)]
pub struct GameAssets {
    /// Full-screen backdrop
    pub background: ImageRef,
    /// Plasma shot
    pub bullet: ImageRef,
    /// Ship variants
    pub ship: ShipImages,
    /// Big asteroid variants
    pub big_asteroids: Vec<ImageRef>,
    /// Medium asteroid variants
    pub medium_asteroids: Vec<ImageRef>,
    /// Small asteroid variants
    pub small_asteroids: Vec<ImageRef>,
    /// Tiny asteroid variants
    pub tiny_asteroids: Vec<ImageRef>,
    /// 16-frame, 4-column sheet of 96x96 cells
    pub big_explosion: ImageRef,
    /// 8-frame, 4-column sheet of 40x40 cells
    pub small_explosion: ImageRef,
    /// HUD bar outline
    pub bar_frame: ImageRef,
    /// One unit of the health bar
    pub bar_health: ImageRef,
    /// One unit of the shield bar
    pub bar_shield: ImageRef,
    /// Power-up images, in [`PowerupKind::ALL`] order
    pub powerups: [ImageRef; 6],
}

fn image(loader: &mut dyn ResourceLoader, folder: &Path, name: &str, fallback: (i32, i32)) -> ImageRef {
    let handle = loader.load_image(&folder.join(name), fallback);
    let (width, height) = loader.image_size(handle);
    ImageRef { handle, width, height }
}

fn numbered(
    loader: &mut dyn ResourceLoader,
    folder: &Path,
    stem: &str,
    count: usize,
    fallback: (i32, i32),
) -> Vec<ImageRef> {
    (1..=count)
        .map(|n| image(loader, folder, &format!("{}{}.png", stem, n), fallback))
        .collect()
}

impl GameAssets {
    /// Request every game image from `folder`
    pub fn load(loader: &mut dyn ResourceLoader, folder: &Path) -> Self {
        log::info!("Loading images from {}", folder.display());
        let powerup = (32, 32);
        Self {
            background: image(loader, folder, "space.png", (800, 600)),
            bullet: image(loader, folder, "plasmashot.png", (8, 8)),
            ship: ShipImages {
                normal: image(loader, folder, "spaceship.png", (40, 40)),
                thrust: image(loader, folder, "ship_thrust.png", (40, 40)),
                shield: image(loader, folder, "ship_shield.png", (40, 40)),
            },
            big_asteroids: numbered(loader, folder, "asteroid", 5, (80, 80)),
            medium_asteroids: numbered(loader, folder, "medium", 2, (48, 48)),
            small_asteroids: numbered(loader, folder, "small", 3, (32, 32)),
            tiny_asteroids: numbered(loader, folder, "tiny", 4, (16, 16)),
            big_explosion: image(loader, folder, "explosion.png", (384, 384)),
            small_explosion: image(loader, folder, "explosion2.png", (160, 80)),
            bar_frame: image(loader, folder, "barframe.png", (164, 14)),
            bar_health: image(loader, folder, "bar_health.png", (8, 10)),
            bar_shield: image(loader, folder, "bar_shield.png", (8, 10)),
            powerups: [
                image(loader, folder, "powerup_shield2.png", powerup),
                image(loader, folder, "powerup_cola.png", powerup),
                image(loader, folder, "powerup_250.png", powerup),
                image(loader, folder, "powerup_500.png", powerup),
                image(loader, folder, "powerup_1000.png", powerup),
                image(loader, folder, "powerup_gun.png", powerup),
            ],
        }
    }

    /// Image variants for an asteroid size
    pub fn asteroid_variants(&self, size: AsteroidSize) -> &[ImageRef] {
        match size {
            AsteroidSize::Big => &self.big_asteroids,
            AsteroidSize::Medium => &self.medium_asteroids,
            AsteroidSize::Small => &self.small_asteroids,
            AsteroidSize::Tiny => &self.tiny_asteroids,
        }
    }

    /// Image of a power-up
    pub fn powerup(&self, kind: PowerupKind) -> ImageRef {
        let index = PowerupKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or_default();
        self.powerups[index]
    }
}

/// Sound clip names and the files behind them
#[derive(Debug, Clone)]
pub struct Sounds {
    /// Looping background music
    pub music: ClipId,
    /// Played once per volley
    pub shoot: ClipId,
    /// Played for every explosion
    pub explosion: ClipId,
}

impl Default for Sounds {
    fn default() -> Self {
        Self {
            music: ClipId::new("music"),
            shoot: ClipId::new("shoot"),
            explosion: ClipId::new("explode"),
        }
    }
}

impl Sounds {
    /// Each clip with the file it is read from
    pub fn files(&self, folder: &Path) -> Vec<(ClipId, PathBuf)> {
        vec![
            (self.music.clone(), folder.join("music.ogg")),
            (self.shoot.clone(), folder.join("shoot.wav")),
            (self.explosion.clone(), folder.join("explode.wav")),
        ]
    }

    /// Every clip id
    pub fn all(&self) -> [&ClipId; 3] {
        [&self.music, &self.shoot, &self.explosion]
    }
}
