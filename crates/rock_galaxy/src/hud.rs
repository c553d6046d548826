//! Screens and heads-up display

use crate::assets::{GameAssets, ImageRef};
use crate::state::{GameState, GameStatus};
use sprite_engine::foundation::math::Vec2;
use sprite_engine::render::{Color, DrawParams, RenderError, Renderer, TextSize, TextStyle};

const TITLE_RED: Color = Color::rgb(200, 30, 30);
const BORDER_DISTANCE: i32 = 30;

/// Approximate advance of one character, used for centring
fn text_width(text: &str, style: TextStyle) -> i32 {
    let per_char = match style.size {
        TextSize::Normal => 12,
        TextSize::Large => 24,
    };
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX).saturating_mul(per_char)
}

fn centered(renderer: &mut dyn Renderer, text: &str, y: i32, width: i32, style: TextStyle) -> Result<(), RenderError> {
    let x = (width - text_width(text, style)) / 2;
    renderer.draw_text(text, x.max(0), y, style)
}

fn blit(renderer: &mut dyn Renderer, image: ImageRef, x: i32, y: i32) -> Result<(), RenderError> {
    renderer.draw_image(
        image.handle,
        &DrawParams {
            position: Vec2::new(f64::from(x), f64::from(y)),
            width: image.width,
            height: image.height,
            rotation: 0.0,
            source: None,
        },
    )
}

/// Draw the background and the overlay for the current screen
pub fn draw_screen(
    renderer: &mut dyn Renderer,
    state: &GameState,
    assets: &GameAssets,
    width: i32,
    height: i32,
) -> Result<(), RenderError> {
    renderer.draw_image(
        assets.background.handle,
        &DrawParams {
            position: Vec2::zeros(),
            width: width - 1,
            height: height - 1,
            rotation: 0.0,
            source: None,
        },
    )?;

    match state.status {
        GameStatus::Menu => draw_menu(renderer, width, height),
        GameStatus::Running => draw_hud(renderer, state, assets, width),
        GameStatus::Over => draw_banner(renderer, "GAME OVER", width, height),
        GameStatus::Won => draw_banner(renderer, "GAME WON", width, height),
    }
}

fn draw_menu(renderer: &mut dyn Renderer, width: i32, height: i32) -> Result<(), RenderError> {
    centered(renderer, "ROCK GALAXY", height / 4, width, TextStyle::title(TITLE_RED))?;

    let legend = TextStyle::plain(Color::YELLOW);
    let mut y = height * 6 / 11;
    centered(renderer, "KEYS:", y, width, TextStyle::plain(Color::GREEN))?;
    for (action, keys) in [
        ("ROTATION", "RIGHT/LEFT ARROWS"),
        ("ACCELERATION", "UP ARROW"),
        ("SHIELD", "S (NO POINTS)"),
        ("FIRE", "SPACE"),
    ] {
        y += 24;
        let left = width / 2 - 20 - text_width(action, legend);
        renderer.draw_text(action, left, y, legend)?;
        centered(renderer, "-", y, width, legend)?;
        renderer.draw_text(keys, width / 2 + 20, y, legend)?;
    }

    centered(
        renderer,
        "PICK UP POWERUPS TO IMPROVE YOUR FIRE RATE!",
        height * 4 / 5,
        width,
        TextStyle::plain(Color::WHITE),
    )?;
    centered(renderer, "PRESS ENTER TO START", height * 9 / 10, width, TextStyle::title(Color::GREEN))
}

fn draw_hud(renderer: &mut dyn Renderer, state: &GameState, assets: &GameAssets, width: i32) -> Result<(), RenderError> {
    let bar_x = width - assets.bar_frame.width - BORDER_DISTANCE;

    for (row, (value, unit)) in [(state.health, assets.bar_health), (state.shield, assets.bar_shield)]
        .into_iter()
        .enumerate()
    {
        let row = i32::try_from(row).unwrap_or_default();
        blit(renderer, assets.bar_frame, bar_x - 2, 18 + row * 15)?;
        for n in 0..value.max(0) {
            blit(renderer, unit, bar_x + n * unit.width, 20 + row * 15)?;
        }
    }

    let gun = assets.powerup(crate::components::PowerupKind::Gun);
    for n in 0..i32::try_from(state.firepower).unwrap_or_default() {
        blit(renderer, gun, width - 190 - BORDER_DISTANCE + n * 13, 17)?;
    }

    let score_style = TextStyle {
        bold: true,
        ..TextStyle::plain(Color::WHITE)
    };
    renderer.draw_text(&state.score.to_string(), 20, 40, score_style)?;
    centered(
        renderer,
        &state.highscore.to_string(),
        40,
        width,
        TextStyle {
            bold: true,
            ..TextStyle::plain(Color::RED)
        },
    )
}

fn draw_banner(renderer: &mut dyn Renderer, title: &str, width: i32, height: i32) -> Result<(), RenderError> {
    centered(renderer, title, height / 3, width, TextStyle::title(TITLE_RED))?;
    centered(renderer, "PRESS ENTER TO PLAY AGAIN", height * 5 / 6, width, TextStyle::plain(Color::ORANGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_engine::assets::FsImageLoader;
    use sprite_engine::render::{DrawCommand, RecordingRenderer};
    use std::path::Path;

    fn render(state: &GameState) -> RecordingRenderer {
        let assets = GameAssets::load(&mut FsImageLoader::new(Vec::new()), Path::new("none"));
        let mut renderer = RecordingRenderer::new();
        draw_screen(&mut renderer, state, &assets, 800, 600).unwrap();
        renderer
    }

    #[test]
    fn test_menu_prompts_for_enter() {
        let renderer = render(&GameState::default());
        assert!(renderer.has_text("ROCK GALAXY"));
        assert!(renderer.has_text("PRESS ENTER TO START"));
    }

    #[test]
    fn test_hud_bars_follow_stats() {
        let state = GameState {
            status: GameStatus::Running,
            health: 3,
            shield: 2,
            firepower: 4,
            score: 125,
            highscore: 900,
            ..GameState::default()
        };
        let renderer = render(&state);
        // background, two frames, 3 + 2 bar units, 4 gun icons
        assert_eq!(renderer.image_count(), 1 + 2 + 5 + 4);
        assert!(renderer.has_text("125"));
        assert!(renderer.has_text("900"));
    }

    #[test]
    fn test_negative_health_draws_no_units() {
        let state = GameState {
            status: GameStatus::Running,
            health: -2,
            shield: 0,
            firepower: 1,
            ..GameState::default()
        };
        assert_eq!(render(&state).image_count(), 1 + 2 + 1);
    }

    #[test]
    fn test_end_banners() {
        let over = render(&GameState {
            status: GameStatus::Over,
            ..GameState::default()
        });
        assert!(over.has_text("GAME OVER"));
        let won = render(&GameState {
            status: GameStatus::Won,
            ..GameState::default()
        });
        assert!(won.has_text("GAME WON"));
        assert!(won
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Text(text, ..) if text.contains("ENTER"))));
    }
}
