//! Fixed-tick scheduler
//!
//! Each tick, unless the world is paused, every live sprite is advanced and
//! the collision sweep runs; then the application's timed update runs
//! regardless of the pause gate. Dead sprites are removed once per
//! wall-clock second rather than every tick.

use crate::{
    application::{AppError, Application},
    foundation::time::{tick_interval, Clock, FrameCounter},
    input::InputSource,
    physics::detect_collisions,
    render::{DrawParams, RenderError, Renderer},
    world::World,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the live sprite collection and drives the loop.
pub struct Engine<K> {
    world: World<K>,

    /// Engine configuration
    config: EngineConfig,

    /// Frame timing, also drives the purge
    frame_counter: FrameCounter,

    /// Cleared to stop the loop after the current tick
    running: Arc<AtomicBool>,
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Collision reactions dispatched
    pub reactions: usize,
    /// Dead sprites removed
    pub purged: usize,
}

/// Cloneable flag that stops a running engine from any thread
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the loop to stop after the current tick
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<K: Copy> Engine<K> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine at {} ticks/s", config.tick_rate);
        Self {
            world: World::new(),
            config,
            frame_counter: FrameCounter::new(0),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The live sprite collection
    pub fn world(&self) -> &World<K> {
        &self.world
    }

    /// Mutable access to the live sprite collection
    pub fn world_mut(&mut self) -> &mut World<K> {
        &mut self.world
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames counted during the last full second
    pub fn frame_rate(&self) -> u32 {
        self.frame_counter.frame_rate()
    }

    /// Handle that stops [`run`](Self::run) from elsewhere
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the loop is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run the application's startup hook
    pub fn startup<A: Application<K>>(&mut self, app: &mut A, now_millis: u64) -> Result<(), EngineError> {
        self.world.set_now_millis(now_millis);
        self.frame_counter = FrameCounter::new(now_millis);
        app.startup(&mut self.world)
            .map_err(|e| EngineError::ApplicationError(format!("App startup: {}", e)))
    }

    /// Perform one iteration of the game loop at `now_millis`
    pub fn tick<A: Application<K>>(&mut self, app: &mut A, now_millis: u64) -> TickSummary {
        let mut summary = TickSummary::default();
        self.world.set_now_millis(now_millis);

        if !self.world.is_paused() {
            self.update_sprites(app);
            summary.reactions = detect_collisions(&mut self.world, |world, pair| {
                app.sprite_collision(world, pair);
            });
        }

        app.timed_update(&mut self.world);

        if self.frame_counter.frame(now_millis) {
            summary.purged = self.world.purge();
            log::debug!(
                "{} fps, {} sprites, purged {}",
                self.frame_counter.frame_rate(),
                self.world.len(),
                summary.purged
            );
        }
        summary
    }

    /// Advance every live sprite by one tick
    ///
    /// Sprites spawned by the hooks during this pass are advanced too.
    pub fn update_sprites<A: Application<K>>(&mut self, app: &mut A) {
        let mut index = 0;
        while index < self.world.len() {
            let alive = self.world.get(index).is_some_and(|sprite| sprite.is_alive());
            if alive {
                if let Some(sprite) = self.world.get_mut(index) {
                    sprite.update_position();
                    sprite.update_rotation();
                    sprite.update_animation();
                }

                app.sprite_update(&mut self.world, index);

                let died = self.world.get_mut(index).is_some_and(|sprite| {
                    sprite.update_lifetime();
                    !sprite.is_alive()
                });
                if died {
                    app.sprite_dying(&mut self.world, index);
                }
            }
            index += 1;
        }
    }

    /// Draw one frame
    pub fn draw<A: Application<K>>(&self, app: &mut A, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        renderer.begin_frame()?;
        app.refresh_screen(&self.world, renderer)?;

        if !self.world.is_paused() {
            for (index, sprite) in self.world.iter().enumerate() {
                if !sprite.is_alive() {
                    continue;
                }
                if let Some(image) = sprite.image() {
                    let (width, height) = sprite.size();
                    let params = DrawParams {
                        position: sprite.position(),
                        width,
                        height,
                        rotation: sprite.face_angle(),
                        source: sprite.animation().map(|animation| animation.source_rect()),
                    };
                    renderer.draw_image(image, &params)?;
                }
                app.sprite_draw(&self.world, index, renderer)?;
            }
        }

        renderer.end_frame()
    }

    /// Run the engine main loop with the given application
    ///
    /// Polls input, ticks, draws, then sleeps for whatever is left of the
    /// tick interval. Overruns are not made up. The shutdown hook runs even
    /// when drawing fails.
    pub fn run<A: Application<K>>(
        &mut self,
        app: &mut A,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        clock: &dyn Clock,
    ) -> Result<(), EngineError> {
        self.startup(app, clock.now_millis())?;
        self.running.store(true, Ordering::SeqCst);
        log::info!("Starting main loop...");

        let result = self.main_loop(app, input, renderer, clock);

        app.shutdown(&mut self.world);
        self.running.store(false, Ordering::SeqCst);
        log::info!(
            "Engine shutdown complete after {} frames",
            self.frame_counter.total_frames()
        );
        result
    }

    fn main_loop<A: Application<K>>(
        &mut self,
        app: &mut A,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        clock: &dyn Clock,
    ) -> Result<(), EngineError> {
        let interval = tick_interval(self.config.tick_rate);

        while self.is_running() {
            let started = Instant::now();

            let state = input.poll();
            app.handle_input(&mut self.world, &state);
            self.tick(app, clock.now_millis());
            self.draw(app, renderer)?;

            if app.wants_quit() {
                self.quit();
            }

            if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target ticks per second
    pub tick_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tick_rate: 60 }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

impl From<AppError> for EngineError {
    fn from(e: AppError) -> Self {
        Self::ApplicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::foundation::time::ManualClock;
    use crate::input::{InputState, Keys, ScriptedInput};
    use crate::physics::CollisionPair;
    use crate::render::{Color, RecordingRenderer};
    use crate::sprite::{Animation, Sprite};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Ship,
        Rock,
        Spark,
    }

    #[derive(Default)]
    struct Probe {
        started: bool,
        stopped: bool,
        timed_updates: u32,
        updates: u32,
        dying: Vec<usize>,
        collisions: Vec<CollisionPair>,
        inputs: Vec<InputState>,
        quit_after: Option<u32>,
        spawn_on_update: bool,
    }

    impl Application<Kind> for Probe {
        fn startup(&mut self, world: &mut World<Kind>) -> Result<(), AppError> {
            self.started = true;
            world.add(Sprite::new(Kind::Ship).with_size(10, 10));
            Ok(())
        }

        fn handle_input(&mut self, _world: &mut World<Kind>, input: &InputState) {
            self.inputs.push(*input);
        }

        fn timed_update(&mut self, _world: &mut World<Kind>) {
            self.timed_updates += 1;
        }

        fn sprite_update(&mut self, world: &mut World<Kind>, _index: usize) {
            self.updates += 1;
            if self.spawn_on_update {
                self.spawn_on_update = false;
                world.add(Sprite::new(Kind::Spark).with_position(Vec2::new(500.0, 500.0)));
            }
        }

        fn sprite_dying(&mut self, _world: &mut World<Kind>, index: usize) {
            self.dying.push(index);
        }

        fn sprite_collision(&mut self, _world: &mut World<Kind>, pair: CollisionPair) {
            self.collisions.push(pair);
        }

        fn refresh_screen(&mut self, _world: &World<Kind>, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
            renderer.draw_text("HUD", 0, 0, crate::render::TextStyle::default())
        }

        fn sprite_draw(
            &mut self,
            world: &World<Kind>,
            index: usize,
            renderer: &mut dyn Renderer,
        ) -> Result<(), RenderError> {
            let bounds = world.get(index).map(Sprite::bounds).unwrap_or_default();
            renderer.draw_rect(bounds, Color::BLUE, false)
        }

        fn shutdown(&mut self, _world: &mut World<Kind>) {
            self.stopped = true;
        }

        fn wants_quit(&self) -> bool {
            self.quit_after.is_some_and(|limit| self.timed_updates >= limit)
        }
    }

    fn started_engine(app: &mut Probe) -> Engine<Kind> {
        let mut engine = Engine::new(EngineConfig::default());
        engine.startup(app, 0).unwrap();
        engine
    }

    #[test]
    fn test_tick_moves_and_collides() {
        let mut app = Probe::default();
        let mut engine = started_engine(&mut app);
        engine
            .world_mut()
            .add(Sprite::new(Kind::Rock).with_position(Vec2::new(12.0, 0.0)).with_velocity(Vec2::new(-3.0, 0.0)).with_size(10, 10));

        let summary = engine.tick(&mut app, 16);

        assert_eq!(engine.world().get(1).unwrap().position().x, 9.0);
        assert_eq!(summary.reactions, 2);
        assert_eq!(app.collisions[0], CollisionPair { a: 0, b: 1 });
        assert_eq!(app.timed_updates, 1);
        assert_eq!(engine.world().now_millis(), 16);
    }

    #[test]
    fn test_paused_world_only_runs_timed_update() {
        let mut app = Probe::default();
        let mut engine = started_engine(&mut app);
        engine
            .world_mut()
            .add(Sprite::new(Kind::Rock).with_velocity(Vec2::new(1.0, 0.0)).with_size(10, 10));
        engine.world_mut().pause();

        let summary = engine.tick(&mut app, 16);

        assert_eq!(summary.reactions, 0);
        assert_eq!(app.updates, 0);
        assert_eq!(app.timed_updates, 1);
        assert_eq!(engine.world().get(1).unwrap().position().x, 0.0);
    }

    #[test]
    fn test_lifespan_expiry_notifies_and_purges_after_a_second() {
        let mut app = Probe::default();
        let mut engine = started_engine(&mut app);
        engine
            .world_mut()
            .add(Sprite::new(Kind::Spark).with_position(Vec2::new(300.0, 300.0)).with_lifespan(2));

        for tick in 1..=3 {
            engine.tick(&mut app, tick * 16);
        }
        assert_eq!(app.dying, vec![1]);
        assert_eq!(engine.world().len(), 2);

        let summary = engine.tick(&mut app, 1001);
        assert_eq!(summary.purged, 1);
        assert_eq!(engine.world().len(), 1);
    }

    #[test]
    fn test_sprites_spawned_during_update_are_advanced() {
        let mut app = Probe {
            spawn_on_update: true,
            ..Probe::default()
        };
        let mut engine = started_engine(&mut app);

        engine.tick(&mut app, 16);

        assert_eq!(engine.world().len(), 2);
        assert_eq!(app.updates, 2);
    }

    #[test]
    fn test_draw_skips_sprites_while_paused() {
        let mut app = Probe::default();
        let mut engine = started_engine(&mut app);
        let mut renderer = RecordingRenderer::new();
        let sheet = {
            let mut registry = crate::assets::ImageRegistry::new();
            registry.insert(crate::assets::ImageInfo {
                path: "sheet.png".into(),
                width: 64,
                height: 64,
                placeholder: false,
            })
        };
        engine
            .world_mut()
            .add(Sprite::new(Kind::Spark).with_image(sheet).with_animation(Animation::new(4, 2, 32, 32, 0)));

        engine.draw(&mut app, &mut renderer).unwrap();
        assert!(renderer.has_text("HUD"));
        assert_eq!(renderer.image_count(), 1);
        // one bounds rect per live sprite
        assert_eq!(renderer.commands().len(), 4);

        engine.world_mut().pause();
        engine.draw(&mut app, &mut renderer).unwrap();
        assert_eq!(renderer.commands().len(), 1);
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn test_run_stops_when_app_asks() {
        let mut app = Probe {
            quit_after: Some(3),
            ..Probe::default()
        };
        let mut engine = Engine::new(EngineConfig { tick_rate: 1000 });
        let mut input = ScriptedInput::new([Keys::FIRE]);
        let mut renderer = RecordingRenderer::new();
        let clock = ManualClock::new(0);

        engine.run(&mut app, &mut input, &mut renderer, &clock).unwrap();

        assert!(app.started && app.stopped);
        assert_eq!(app.timed_updates, 3);
        assert!(app.inputs[0].was_pressed(Keys::FIRE));
        assert!(app.inputs[1].was_released(Keys::FIRE));
        assert_eq!(renderer.frames(), 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_stop_handle_clears_running_flag() {
        let engine: Engine<Kind> = Engine::new(EngineConfig::default());
        engine.running.store(true, Ordering::SeqCst);
        engine.stop_handle().stop();
        assert!(!engine.is_running());
    }
}
