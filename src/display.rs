/// Rendering layer — all screen drawing lives here.
///
/// Each function receives a mutable writer, the current viewport and an
/// immutable view of what to show.  No game logic is performed; this
/// module only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color},
    terminal, QueueableCommand,
};

use crate::entities::{Rect, Session, MAX_HEALTH, WIDTH};
use crate::ui::{draw_button, draw_health_bar, draw_text, fill_rect, Align, Button, Viewport};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const WHITE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Color = Color::Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Color = Color::Rgb { r: 70, g: 130, b: 180 };
pub const YELLOW: Color = Color::Rgb { r: 255, g: 255, b: 0 };

const BLUE_HOVER: Color = Color::Rgb { r: 100, g: 100, b: 255 };
const RED_HOVER: Color = Color::Rgb { r: 255, g: 100, b: 100 };
const GREEN_HOVER: Color = Color::Rgb { r: 100, g: 255, b: 100 };

const C_PLAYER: Color = BLUE;
const C_ENEMY: Color = RED;
const C_BULLET: Color = GREEN;

// ── Buttons ───────────────────────────────────────────────────────────────────

const UPPER_BUTTON: Rect = Rect::new(WIDTH / 2 - 100, 250, 200, 50);
const LOWER_BUTTON: Rect = Rect::new(WIDTH / 2 - 100, 350, 200, 50);

pub const START_BUTTON: Button = Button::new(UPPER_BUTTON, "START", BLUE, BLUE_HOVER);
pub const QUIT_BUTTON: Button = Button::new(LOWER_BUTTON, "QUIT", RED, RED_HOVER);
pub const RETRY_BUTTON: Button = Button::new(UPPER_BUTTON, "RETRY", BLUE, BLUE_HOVER);
pub const MENU_BUTTON: Button = Button::new(LOWER_BUTTON, "MENU", GREEN, GREEN_HOVER);

/// Hover state of the menu buttons, as found while drawing them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuHover {
    pub start: bool,
    pub quit: bool,
}

/// Hover state of the game-over buttons, as found while drawing them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameOverHover {
    pub retry: bool,
    pub menu: bool,
}

// ── Frame boundaries ──────────────────────────────────────────────────────────

fn begin_frame<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    Ok(())
}

fn end_frame<W: Write>(out: &mut W) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()
}

// ── Screens ───────────────────────────────────────────────────────────────────

/// Render one complete play-screen frame.
pub fn render_game<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    session: &Session,
) -> std::io::Result<()> {
    begin_frame(out)?;

    for enemy in &session.enemies {
        fill_rect(out, viewport, &enemy.rect, '▼', C_ENEMY)?;
    }
    for bullet in &session.bullets {
        fill_rect(out, viewport, &bullet.rect, '│', C_BULLET)?;
    }
    fill_rect(out, viewport, &session.player.rect, '▲', C_PLAYER)?;

    draw_hud(out, viewport, session)?;
    end_frame(out)
}

fn draw_hud<W: Write>(out: &mut W, viewport: &Viewport, session: &Session) -> std::io::Result<()> {
    let score = format!("SCORE: {}", session.score);
    draw_text(out, viewport, &score, WHITE, 10, 10, Align::Left)?;
    draw_health_bar(out, viewport, 10, 40, session.player.health, MAX_HEALTH)
}

/// Render the title screen and report which buttons the pointer is over.
pub fn render_menu<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    pointer: Option<(i32, i32)>,
) -> std::io::Result<MenuHover> {
    begin_frame(out)?;

    draw_text(out, viewport, "SPACE SHOOTER", YELLOW, WIDTH / 2, 100, Align::Center)?;
    let hover = MenuHover {
        start: draw_button(out, viewport, &START_BUTTON, pointer)?,
        quit: draw_button(out, viewport, &QUIT_BUTTON, pointer)?,
    };
    draw_text(
        out,
        viewport,
        "Controls: Arrow Keys/WASD to move, SPACE to shoot",
        WHITE,
        WIDTH / 2,
        500,
        Align::Center,
    )?;

    end_frame(out)?;
    Ok(hover)
}

/// Render the game-over screen with the final score.
pub fn render_game_over<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    score: u32,
    pointer: Option<(i32, i32)>,
) -> std::io::Result<GameOverHover> {
    begin_frame(out)?;

    draw_text(out, viewport, "GAME OVER", RED, WIDTH / 2, 100, Align::Center)?;
    let line = format!("Final Score: {}", score);
    draw_text(out, viewport, &line, WHITE, WIDTH / 2, 180, Align::Center)?;
    let hover = GameOverHover {
        retry: draw_button(out, viewport, &RETRY_BUTTON, pointer)?,
        menu: draw_button(out, viewport, &MENU_BUTTON, pointer)?,
    };

    end_frame(out)?;
    Ok(hover)
}
