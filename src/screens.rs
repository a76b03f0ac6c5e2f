/// Screen state machine: menu → game → game over → (menu | game).
///
/// Each screen owns a blocking loop that ticks the frame clock, drains
/// input, updates and renders until it decides which `Screen` comes next.
/// The decision logic is kept in small pure functions so it can be tested
/// without a terminal.  Keys still held from the previous screen are
/// filtered out on entry (see `CarriedKeys`).

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::terminal;
use log::{debug, info};
use rand::{thread_rng, Rng};

use crate::compute::{new_session, player_shoot, tick};
use crate::display::{self, GameOverHover, MenuHover};
use crate::entities::{MoveInput, Session};
use crate::input::{CarriedKeys, KeyTracker};
use crate::sound::{Audio, Sound};
use crate::ui::Viewport;

pub const FPS: u64 = 60;
pub const FRAME: Duration = Duration::from_micros(1_000_000 / FPS);

/// Which screen runs next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    GameOver { score: u32 },
    Quit,
}

/// One-shot actions taken on the play screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Fire,
    Abort,
    Quit,
}

// ── Event handling (pure) ─────────────────────────────────────────────────────

fn is_interrupt(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_left_click(event: &Event) -> bool {
    matches!(
        event,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        })
    )
}

/// Menu: Enter or START begins a game; Esc, QUIT or Ctrl+C quits.
pub fn menu_action(event: &Event, hover: MenuHover) -> Option<Screen> {
    if is_left_click(event) {
        return if hover.start {
            Some(Screen::Game)
        } else if hover.quit {
            Some(Screen::Quit)
        } else {
            None
        };
    }
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_interrupt(key) {
                return Some(Screen::Quit);
            }
            match key.code {
                KeyCode::Esc => Some(Screen::Quit),
                KeyCode::Enter => Some(Screen::Game),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Play screen: Space fires, Esc abandons the session, Ctrl+C quits.
/// Only key-down counts; `Repeat` is ignored.
pub fn game_action(event: &Event) -> Option<GameCommand> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_interrupt(key) {
        return Some(GameCommand::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(GameCommand::Fire),
        KeyCode::Esc => Some(GameCommand::Abort),
        _ => None,
    }
}

/// One play-screen frame: apply the commands in `events`, then tick the
/// simulation.  Shots that actually fire and kills are sent to `audio`.
///
/// Returns the next screen once the session is over.  A quit or abort
/// stops before the tick.
pub fn game_step(
    session: &mut Session,
    events: &[Event],
    input: &MoveInput,
    now: u64,
    rng: &mut impl Rng,
    audio: &mut impl Audio,
) -> Option<Screen> {
    for ev in events {
        match game_action(ev) {
            Some(GameCommand::Quit) => return Some(Screen::Quit),
            Some(GameCommand::Abort) => {
                info!("session abandoned, score {}", session.score);
                return Some(Screen::GameOver { score: session.score });
            }
            Some(GameCommand::Fire) => {
                if player_shoot(session, now) {
                    audio.play(Sound::Shoot);
                }
            }
            None => {}
        }
    }

    let report = tick(session, input, rng);
    for _ in 0..report.kills {
        audio.play(Sound::Explosion);
    }

    if report.player_dead {
        info!("player destroyed, score {}", session.score);
        return Some(Screen::GameOver { score: session.score });
    }
    None
}

/// Game over: R or RETRY plays again; Esc or MENU returns to the menu.
pub fn game_over_action(event: &Event, hover: GameOverHover) -> Option<Screen> {
    if is_left_click(event) {
        return if hover.retry {
            Some(Screen::Game)
        } else if hover.menu {
            Some(Screen::Menu)
        } else {
            None
        };
    }
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_interrupt(key) {
                return Some(Screen::Quit);
            }
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => Some(Screen::Game),
                KeyCode::Esc => Some(Screen::Menu),
                _ => None,
            }
        }
        _ => None,
    }
}

// ── Frame clock ───────────────────────────────────────────────────────────────

/// Fixed-rate limiter plus a millisecond timer measured from creation.
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    frame_start: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        let now = Instant::now();
        FrameClock {
            started: now,
            frame_start: now,
            frame,
        }
    }

    /// Milliseconds since the clock was created.
    pub fn ticks(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Sleep out whatever is left of the current frame, then start the next.
    pub fn tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

// ── Terminal frontend ─────────────────────────────────────────────────────────

/// Everything the screen loops share: output, viewport, pointer, clock,
/// audio and the held-key state that outlives a single screen.
pub struct Frontend<W: Write, A: Audio> {
    out: W,
    viewport: Viewport,
    /// Last known mouse position, in world pixels.
    pointer: Option<(i32, i32)>,
    clock: FrameClock,
    audio: A,
    keys: KeyTracker,
    /// Frames since startup, across all screens.
    frame: u64,
}

impl<W: Write, A: Audio> Frontend<W, A> {
    pub fn new(out: W, audio: A) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Frontend {
            out,
            viewport: Viewport::new(cols, rows),
            pointer: None,
            clock: FrameClock::new(FRAME),
            audio,
            keys: KeyTracker::new(),
            frame: 0,
        })
    }

    fn next_frame(&mut self) {
        self.clock.tick();
        self.frame += 1;
    }

    /// Keys held when the calling screen starts.
    fn carried_keys(&self) -> CarriedKeys {
        let carried = CarriedKeys::from_tracker(&self.keys, self.frame);
        if !carried.is_empty() {
            debug!("frame {}: ignoring keys held over from the last screen", self.frame);
        }
        carried
    }

    /// Drain all pending input without blocking.  Every key updates the
    /// held-key state; resize and mouse events also update the viewport and
    /// pointer.  Events for keys in `carried` are not handed back.
    fn poll_events(&mut self, carried: &mut CarriedKeys) -> std::io::Result<Vec<Event>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            match &ev {
                Event::Resize(cols, rows) => self.viewport = Viewport::new(*cols, *rows),
                Event::Mouse(m) => self.pointer = Some(self.viewport.to_world(m.column, m.row)),
                Event::Key(key) => self.keys.record(key, self.frame),
                _ => {}
            }
            if carried.admit(&ev, self.frame) {
                events.push(ev);
            }
        }
        Ok(events)
    }

    pub fn menu_loop(&mut self) -> std::io::Result<Screen> {
        let mut carried = self.carried_keys();
        loop {
            let events = self.poll_events(&mut carried)?;
            let hover = display::render_menu(&mut self.out, &self.viewport, self.pointer)?;
            if let Some(next) = events.iter().find_map(|ev| menu_action(ev, hover)) {
                return Ok(next);
            }
            self.next_frame();
        }
    }

    pub fn game_loop(&mut self) -> std::io::Result<Screen> {
        let mut rng = thread_rng();
        let mut carried = self.carried_keys();
        let mut session = new_session(self.clock.ticks(), &mut rng);
        info!("session started with {} enemies", session.enemies.len());

        loop {
            self.next_frame();

            let events = self.poll_events(&mut carried)?;
            let input = self.keys.movement(self.frame);
            let next = game_step(
                &mut session,
                &events,
                &input,
                self.clock.ticks(),
                &mut rng,
                &mut self.audio,
            );

            display::render_game(&mut self.out, &self.viewport, &session)?;

            if let Some(next) = next {
                return Ok(next);
            }
        }
    }

    pub fn game_over_loop(&mut self, score: u32) -> std::io::Result<Screen> {
        let mut carried = self.carried_keys();
        loop {
            let events = self.poll_events(&mut carried)?;
            let hover =
                display::render_game_over(&mut self.out, &self.viewport, score, self.pointer)?;
            if let Some(next) = events.iter().find_map(|ev| game_over_action(ev, hover)) {
                return Ok(next);
            }
            self.next_frame();
        }
    }
}
