/// Drawing helpers shared by every screen.
///
/// Layout is expressed in world pixels (800×600); a `Viewport` scales it
/// onto whatever terminal size is current.  Helpers only queue commands,
/// the caller flushes once per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{Rect, HEIGHT, WIDTH};

pub const HEALTH_BAR_LENGTH: f32 = 200.0;
pub const HEALTH_BAR_HEIGHT: i32 = 20;

const C_TEXT: Color = Color::White;
const C_BAR_FILL: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_BAR_EMPTY: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world pixels onto terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// A block of terminal cells, already clipped to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Column containing world x (may lie outside the terminal).
    pub fn col_of(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64).div_euclid(WIDTH as i64) as i32
    }

    /// Row containing world y (may lie outside the terminal).
    pub fn row_of(&self, y: i32) -> i32 {
        (y as i64 * self.rows as i64).div_euclid(HEIGHT as i64) as i32
    }

    /// World point at the centre of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * col as i64 + 1) * WIDTH as i64 / (2 * self.cols as i64);
        let y = (2 * row as i64 + 1) * HEIGHT as i64 / (2 * self.rows as i64);
        (x as i32, y as i32)
    }

    /// Cells covered by a world rect, at least one cell per axis so small
    /// sprites never vanish.  `None` once the rect is entirely off screen.
    pub fn cells(&self, rect: &Rect) -> Option<CellRect> {
        let c0 = self.col_of(rect.left());
        let c1 = self.col_of(rect.right()).max(c0 + 1);
        let r0 = self.row_of(rect.top());
        let r1 = self.row_of(rect.bottom()).max(r0 + 1);

        let (c0, c1) = (c0.max(0), c1.min(self.cols as i32));
        let (r0, r1) = (r0.max(0), r1.min(self.rows as i32));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Fill the cells under `rect` with `glyph` in `color`.
pub fn fill_rect<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some(cells) = viewport.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(cells.width as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.row..cells.row + cells.height {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Draw `text` anchored at world point `(x, y)`: its top-left corner for
/// `Align::Left`, its centre for `Align::Center`.
pub fn draw_text<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    text: &str,
    color: Color,
    x: i32,
    y: i32,
    align: Align,
) -> std::io::Result<()> {
    let row = viewport.row_of(y);
    if row < 0 || row >= viewport.rows as i32 {
        return Ok(());
    }
    let len = text.chars().count() as i32;
    let col = match align {
        Align::Left => viewport.col_of(x),
        Align::Center => viewport.col_of(x) - len / 2,
    };
    let col = col.clamp(0, viewport.cols as i32 - 1) as u16;
    // Never run past the right edge; the terminal would wrap onto the next row.
    let fits: String = text.chars().take((viewport.cols - col) as usize).collect();
    out.queue(cursor::MoveTo(col, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(fits))?;
    Ok(())
}

// ── Health bar ────────────────────────────────────────────────────────────────

/// Filled length of the bar, proportional to `health / max_health`.
pub fn health_bar_fill(health: f32, max_health: f32) -> f32 {
    if max_health <= 0.0 {
        return 0.0;
    }
    (health / max_health).clamp(0.0, 1.0) * HEALTH_BAR_LENGTH
}

/// Bar with its top-left corner at world `(x, y)`, framed by white brackets.
pub fn draw_health_bar<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    x: i32,
    y: i32,
    health: f32,
    max_health: f32,
) -> std::io::Result<()> {
    let outline = Rect::new(x, y, HEALTH_BAR_LENGTH as i32, HEALTH_BAR_HEIGHT);
    let Some(cells) = viewport.cells(&outline) else {
        return Ok(());
    };
    let fraction = health_bar_fill(health, max_health) / HEALTH_BAR_LENGTH;
    let filled = (fraction * cells.width as f32).round() as usize;
    let empty = cells.width as usize - filled.min(cells.width as usize);

    for row in cells.row..cells.row + cells.height {
        if cells.col > 0 {
            out.queue(cursor::MoveTo(cells.col - 1, row))?;
            out.queue(style::SetForegroundColor(C_TEXT))?;
            out.queue(Print("["))?;
        } else {
            out.queue(cursor::MoveTo(cells.col, row))?;
        }
        out.queue(style::SetForegroundColor(C_BAR_FILL))?;
        out.queue(Print("█".repeat(filled.min(cells.width as usize))))?;
        out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
        out.queue(Print("░".repeat(empty)))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print("]"))?;
    }
    Ok(())
}

// ── Buttons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub color: Color,
    pub hover_color: Color,
}

impl Button {
    pub const fn new(rect: Rect, label: &'static str, color: Color, hover_color: Color) -> Self {
        Button {
            rect,
            label,
            color,
            hover_color,
        }
    }

    pub fn is_hovered(&self, pointer: Option<(i32, i32)>) -> bool {
        pointer.map_or(false, |(px, py)| self.rect.contains(px, py))
    }
}

/// Draw `button`, highlighted if the pointer is over it, and report whether
/// it is hovered.  Screens use the result to decide what a click activates.
pub fn draw_button<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    button: &Button,
    pointer: Option<(i32, i32)>,
) -> std::io::Result<bool> {
    let hovered = button.is_hovered(pointer);
    let fill = if hovered { button.hover_color } else { button.color };

    if let Some(cells) = viewport.cells(&button.rect) {
        let blank = " ".repeat(cells.width as usize);
        out.queue(style::SetBackgroundColor(fill))?;
        for row in cells.row..cells.row + cells.height {
            out.queue(cursor::MoveTo(cells.col, row))?;
            out.queue(Print(&blank))?;
        }
        draw_text(
            out,
            viewport,
            button.label,
            C_TEXT,
            button.rect.center_x(),
            button.rect.center_y(),
            Align::Center,
        )?;
        out.queue(style::ResetColor)?;
    }
    Ok(hovered)
}
