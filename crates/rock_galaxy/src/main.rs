//! Rock Galaxy in the terminal
//!
//! Usage: `rock_galaxy [config.toml|config.ron]`
//!
//! Arrows or WASD steer and thrust, space fires, `s` raises the shield,
//! Enter starts a round and `q` quits. Logging goes to stderr only when
//! `RUST_LOG` is set, so it does not scribble over the game screen.

mod terminal;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rock_galaxy::assets::GameAssets;
use rock_galaxy::{GameConfig, RockGalaxy};
use sprite_engine::assets::FsImageLoader;
use sprite_engine::audio::{AudioPlayer, NullAudio};
use sprite_engine::foundation::{logging, time::SystemClock};
use sprite_engine::{Engine, EngineConfig};
use std::error::Error;
use std::path::PathBuf;

/// How long a key stays held after its last press or repeat event
const HOLD_WINDOW_MILLIS: u64 = 150;

fn main() -> Result<(), Box<dyn Error>> {
    if std::env::var_os("RUST_LOG").is_some() {
        logging::init();
    }

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref());

    let mut loader = FsImageLoader::new(vec![PathBuf::from(".")]);
    let assets = GameAssets::load(&mut loader, &config.assets.images_folder);
    let images = loader.into_registry();
    if images.placeholder_count() > 0 {
        log::warn!("{} of {} images are placeholders", images.placeholder_count(), images.len());
    }

    let audio = open_audio(&config);
    let mut game = RockGalaxy::new(&config, assets, audio, StdRng::from_entropy());
    let mut engine = Engine::new(EngineConfig {
        tick_rate: config.window.tick_rate,
    });

    let hold_window = (u64::from(config.window.tick_rate) * HOLD_WINDOW_MILLIS / 1000).max(1);
    let world_size = (config.window.width, config.window.height);

    let session = terminal::Session::enter(&config.window.title)?;
    let mut input = terminal::TerminalInput::spawn(engine.stop_handle(), hold_window);
    let result = match terminal::TerminalRenderer::new(std::io::stdout(), images, world_size) {
        Ok(mut renderer) => engine
            .run(&mut game, &mut input, &mut renderer, &SystemClock::new())
            .map_err(Box::<dyn Error>::from),
        Err(e) => Err(e.into()),
    };
    drop(session);

    if let Err(e) = &result {
        eprintln!("rock_galaxy: {e}");
    }
    result
}

#[cfg(feature = "audio")]
fn open_audio(config: &GameConfig) -> Box<dyn AudioPlayer> {
    use rock_galaxy::assets::Sounds;
    use sprite_engine::audio::backend::RodioAudio;

    if !config.audio.enabled {
        return Box::new(NullAudio);
    }
    match RodioAudio::new(config.audio.volume) {
        Ok(mut player) => {
            for (clip, path) in Sounds::default().files(&config.assets.sounds_folder) {
                if let Err(e) = player.load(clip, &path) {
                    log::warn!("Skipping sound {}: {}", path.display(), e);
                }
            }
            log::info!("Audio ready with {} clips", player.clip_count());
            Box::new(player)
        }
        Err(e) => {
            log::warn!("Audio unavailable ({e}); continuing silently");
            Box::new(NullAudio)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_audio(config: &GameConfig) -> Box<dyn AudioPlayer> {
    if config.audio.enabled {
        log::info!("Built without the `audio` feature; sound is off");
    }
    Box::new(NullAudio)
}
