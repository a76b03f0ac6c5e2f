use std::io::{stdout, BufWriter, Write};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info};

use space_shooter::screens::{Frontend, Screen};
use space_shooter::sound::SilentAudio;

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG is set; redirect stderr to keep the screen clean.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    debug!("keyboard enhancement: {}", keyboard_enhanced);

    let result = run(&mut out);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

/// Dispatch to the active screen until one of them asks to quit.
fn run<W: Write>(out: &mut W) -> std::io::Result<()> {
    let mut frontend = Frontend::new(out, SilentAudio)?;
    let mut screen = Screen::Menu;

    loop {
        info!("entering {:?}", screen);
        screen = match screen {
            Screen::Menu => frontend.menu_loop()?,
            Screen::Game => frontend.game_loop()?,
            Screen::GameOver { score } => frontend.game_over_loop(score)?,
            Screen::Quit => break,
        };
    }
    Ok(())
}
