use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use rand::rngs::mock::StepRng;

use space_shooter::compute::{new_session, spawn_bullet};
use space_shooter::display::{GameOverHover, MenuHover};
use space_shooter::entities::{MoveInput, Rect, Session, ENEMY_HEIGHT, ENEMY_WIDTH};
use space_shooter::input::{CarriedKeys, KeyTracker, CARRY_WINDOW};
use space_shooter::screens::*;
use space_shooter::sound::{Audio, Sound};

fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        state: KeyEventState::NONE,
    })
}

fn press(code: KeyCode) -> Event {
    key_event(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn ctrl_c() -> Event {
    key_event(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press)
}

fn mouse(kind: MouseEventKind) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: 40,
        row: 12,
        modifiers: KeyModifiers::NONE,
    })
}

fn click() -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left))
}

const NO_MENU_HOVER: MenuHover = MenuHover { start: false, quit: false };
const NO_GAME_OVER_HOVER: GameOverHover = GameOverHover { retry: false, menu: false };

// ── menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_enter_starts_game() {
    assert_eq!(menu_action(&press(KeyCode::Enter), NO_MENU_HOVER), Some(Screen::Game));
}

#[test]
fn menu_escape_and_interrupt_quit() {
    assert_eq!(menu_action(&press(KeyCode::Esc), NO_MENU_HOVER), Some(Screen::Quit));
    assert_eq!(menu_action(&ctrl_c(), NO_MENU_HOVER), Some(Screen::Quit));
}

#[test]
fn menu_click_activates_hovered_button() {
    let on_start = MenuHover { start: true, quit: false };
    let on_quit = MenuHover { start: false, quit: true };
    assert_eq!(menu_action(&click(), on_start), Some(Screen::Game));
    assert_eq!(menu_action(&click(), on_quit), Some(Screen::Quit));
    assert_eq!(menu_action(&click(), NO_MENU_HOVER), None);
}

#[test]
fn menu_ignores_other_input() {
    let start = MenuHover { start: true, quit: false };
    assert_eq!(menu_action(&mouse(MouseEventKind::Moved), start), None);
    assert_eq!(menu_action(&mouse(MouseEventKind::Down(MouseButton::Right)), start), None);
    assert_eq!(menu_action(&press(KeyCode::Char(' ')), NO_MENU_HOVER), None);
    let released = key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(menu_action(&released, NO_MENU_HOVER), None);
    assert_eq!(menu_action(&Event::Resize(100, 30), NO_MENU_HOVER), None);
}

// ── game ──────────────────────────────────────────────────────────────────────

#[test]
fn game_space_fires_on_key_down_only() {
    assert_eq!(game_action(&press(KeyCode::Char(' '))), Some(GameCommand::Fire));
    let repeat = key_event(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Repeat);
    assert_eq!(game_action(&repeat), None);
    let release = key_event(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(game_action(&release), None);
}

#[test]
fn game_escape_aborts_once() {
    assert_eq!(game_action(&press(KeyCode::Esc)), Some(GameCommand::Abort));
    let repeat = key_event(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Repeat);
    assert_eq!(game_action(&repeat), None);
}

#[test]
fn game_interrupt_quits() {
    assert_eq!(game_action(&ctrl_c()), Some(GameCommand::Quit));
}

#[test]
fn game_movement_keys_are_not_commands() {
    for code in [KeyCode::Left, KeyCode::Char('w'), KeyCode::Char('c'), KeyCode::Enter] {
        assert_eq!(game_action(&press(code)), None);
    }
    assert_eq!(game_action(&click()), None);
}

// ── game step ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RecordingAudio {
    played: Vec<Sound>,
}

impl Audio for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}

impl RecordingAudio {
    fn count(&self, sound: Sound) -> usize {
        self.played.iter().filter(|&&s| s == sound).count()
    }
}

/// Session started at t = 0 with every enemy parked above the screen.
fn quiet_session() -> Session {
    new_session(0, &mut StepRng::new(0, 0))
}

fn step(session: &mut Session, events: &[Event], now: u64, audio: &mut RecordingAudio) -> Option<Screen> {
    game_step(session, events, &MoveInput::default(), now, &mut StepRng::new(0, 0), audio)
}

#[test]
fn step_without_input_keeps_playing() {
    let mut s = quiet_session();
    let mut audio = RecordingAudio::default();
    assert_eq!(step(&mut s, &[], 16, &mut audio), None);
    assert_eq!(s.frame, 1);
    assert!(audio.played.is_empty());
}

#[test]
fn escape_ends_session_with_current_score() {
    let mut s = quiet_session();
    s.score = 30;
    let mut audio = RecordingAudio::default();
    let next = step(&mut s, &[press(KeyCode::Esc)], 16, &mut audio);
    assert_eq!(next, Some(Screen::GameOver { score: 30 }));
    // Stops before the simulation advances
    assert_eq!(s.frame, 0);
}

#[test]
fn interrupt_quits_from_play() {
    let mut s = quiet_session();
    let mut audio = RecordingAudio::default();
    assert_eq!(step(&mut s, &[ctrl_c()], 16, &mut audio), Some(Screen::Quit));
}

#[test]
fn death_ends_session_with_score() {
    let mut s = quiet_session();
    s.score = 70;
    s.player.health = 0.5;
    s.enemies[0].rect = s.player.rect;
    let mut audio = RecordingAudio::default();
    let next = step(&mut s, &[], 16, &mut audio);
    assert_eq!(next, Some(Screen::GameOver { score: 70 }));
    assert_eq!(s.player.health, 0.0);
}

#[test]
fn shoot_sound_only_for_bullets_fired() {
    let mut s = quiet_session();
    let mut audio = RecordingAudio::default();
    let space = press(KeyCode::Char(' '));

    // Still inside the cooldown that starts with the session
    step(&mut s, &[space.clone()], 100, &mut audio);
    assert!(s.bullets.is_empty());
    assert_eq!(audio.count(Sound::Shoot), 0);

    // Two presses in one frame: the second one hits the cooldown
    step(&mut s, &[space.clone(), space], 250, &mut audio);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(audio.count(Sound::Shoot), 1);
}

#[test]
fn explosion_per_enemy_destroyed() {
    let mut s = quiet_session();
    for (i, x) in [100, 300].into_iter().enumerate() {
        s.enemies[i].rect = Rect::new(x, 200, ENEMY_WIDTH, ENEMY_HEIGHT);
        s.bullets.push(spawn_bullet(x + ENEMY_WIDTH / 2, 220));
    }
    let mut audio = RecordingAudio::default();
    assert_eq!(step(&mut s, &[], 16, &mut audio), None);
    assert_eq!(audio.count(Sound::Explosion), 2);
    assert_eq!(audio.count(Sound::Shoot), 0);
    assert_eq!(s.score, 20);
}

// ── held keys across screens ──────────────────────────────────────────────────

#[test]
fn held_escape_does_not_walk_through_screens() {
    let esc = press(KeyCode::Esc);
    let Event::Key(esc_key) = &esc else { unreachable!() };
    let mut keys = KeyTracker::new();

    // Frame 10: Esc abandons the game
    keys.record(esc_key, 10);
    assert_eq!(game_action(&esc), Some(GameCommand::Abort));

    // The game-over screen starts with Esc still down; a classic terminal
    // then reports auto-repeat as more presses
    let mut carried = CarriedKeys::from_tracker(&keys, 10);
    for frame in (40..200).step_by(2) {
        keys.record(esc_key, frame);
        assert!(!carried.admit(&esc, frame), "frame {}", frame);
    }

    // Released and pressed again later: back to the menu, not further
    let frame = 199 + CARRY_WINDOW;
    keys.record(esc_key, frame);
    assert!(carried.admit(&esc, frame));
    assert_eq!(game_over_action(&esc, NO_GAME_OVER_HOVER), Some(Screen::Menu));

    // The menu starts with that press still live
    let mut carried = CarriedKeys::from_tracker(&keys, frame);
    assert!(!carried.admit(&esc, frame + 30));
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn game_over_retry_keys() {
    assert_eq!(game_over_action(&press(KeyCode::Char('r')), NO_GAME_OVER_HOVER), Some(Screen::Game));
    assert_eq!(game_over_action(&press(KeyCode::Char('R')), NO_GAME_OVER_HOVER), Some(Screen::Game));
}

#[test]
fn game_over_escape_returns_to_menu() {
    assert_eq!(game_over_action(&press(KeyCode::Esc), NO_GAME_OVER_HOVER), Some(Screen::Menu));
}

#[test]
fn game_over_interrupt_quits() {
    assert_eq!(game_over_action(&ctrl_c(), NO_GAME_OVER_HOVER), Some(Screen::Quit));
}

#[test]
fn game_over_click_activates_hovered_button() {
    let on_retry = GameOverHover { retry: true, menu: false };
    let on_menu = GameOverHover { retry: false, menu: true };
    assert_eq!(game_over_action(&click(), on_retry), Some(Screen::Game));
    assert_eq!(game_over_action(&click(), on_menu), Some(Screen::Menu));
    assert_eq!(game_over_action(&click(), NO_GAME_OVER_HOVER), None);
}

#[test]
fn game_over_ignores_enter() {
    assert_eq!(game_over_action(&press(KeyCode::Enter), NO_GAME_OVER_HOVER), None);
}

// ── frame clock ───────────────────────────────────────────────────────────────

#[test]
fn frame_constant_matches_sixty_hz() {
    assert_eq!(FPS, 60);
    assert_eq!(FRAME, Duration::from_micros(16_666));
}

#[test]
fn tick_waits_out_the_frame() {
    let frame = Duration::from_millis(20);
    let begun = Instant::now();
    let mut clock = FrameClock::new(frame);
    clock.tick();
    clock.tick();
    assert!(begun.elapsed() >= frame * 2);
    assert!(clock.ticks() >= 40);
}
