/// Held-key tracking for terminals.
///
/// Instead of acting on each key event individually, we record the frame
/// number of the last press/repeat event for every key.  Each frame we
/// check which keys are still "fresh" and turn them into a `MoveInput`.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.
///
/// `CarriedKeys` sits in front of a screen's handlers and swallows keys that
/// were already down when the screen was entered.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::entities::MoveInput;

/// A key counts as held if its last press/repeat event arrived within this
/// many frames (8 frames @ 60 FPS ≈ 133 ms, longer than the OS repeat
/// interval so a held key stays live while it keeps generating repeats).
pub const HOLD_WINDOW: u64 = 8;

/// A key carried into a new screen stays blocked until it has been silent
/// this many frames (45 frames @ 60 FPS = 750 ms).  Must exceed the OS
/// auto-repeat start delay, which is typically 250-660 ms.
pub const CARRY_WINDOW: u64 = 45;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event observed during `frame`.
    pub fn record(&mut self, key: &KeyEvent, frame: u64) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(key.code, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key.code);
            }
        }
    }

    pub fn is_held(&self, code: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(code)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|c| self.is_held(c, frame))
    }

    /// Directions live during `frame`.
    pub fn movement(&self, frame: u64) -> MoveInput {
        MoveInput {
            left: self.any_held(&LEFT_KEYS, frame),
            right: self.any_held(&RIGHT_KEYS, frame),
            up: self.any_held(&UP_KEYS, frame),
            down: self.any_held(&DOWN_KEYS, frame),
        }
    }
}

/// Keys already down when a screen started.
///
/// Their events are dropped until the key is released or stays silent for
/// `CARRY_WINDOW` frames; every dropped repeat pushes that point back.  After
/// that the key is forgotten and a new press goes through as usual.
#[derive(Debug, Default)]
pub struct CarriedKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl CarriedKeys {
    /// Carry over every key `tracker` considers held at `frame`.
    pub fn from_tracker(tracker: &KeyTracker, frame: u64) -> Self {
        let last_seen = tracker
            .last_seen
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) <= HOLD_WINDOW)
            .map(|(&code, &last)| (code, last))
            .collect();
        CarriedKeys { last_seen }
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    /// `true` if `event`, observed during `frame`, should reach the screen.
    pub fn admit(&mut self, event: &Event, frame: u64) -> bool {
        let Event::Key(key) = event else {
            return true;
        };
        let Some(&last) = self.last_seen.get(&key.code) else {
            return true;
        };
        if key.kind == KeyEventKind::Release {
            self.last_seen.remove(&key.code);
            return false;
        }
        if frame.saturating_sub(last) > CARRY_WINDOW {
            self.last_seen.remove(&key.code);
            return true;
        }
        self.last_seen.insert(key.code, frame);
        false
    }
}
