//! Logical controls, the key bindings that produce them, and tracking of
//! which keys are still held between frames.

use std::collections::HashMap;

use crossterm::event::KeyCode;

/// How long a key stays held after its last press/repeat event on terminals
/// that never report release. Has to outlast the OS initial key-repeat delay
/// (up to ~600 ms), otherwise a held key drops out until repeats start.
/// 38 frames at 16 ms ≈ 608 ms.
pub const HOLD_WINDOW_FRAMES: u64 = 38;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Laser,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::MoveLeft, Action::MoveRight, Action::Fire, Action::Laser];

    /// Map a terminal key to the action it drives, if any.
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
            KeyCode::Char(' ') => Some(Action::Fire),
            KeyCode::Char('x')
            | KeyCode::Char('X')
            | KeyCode::Char('l')
            | KeyCode::Char('L') => Some(Action::Laser),
            _ => None,
        }
    }
}

/// The set of actions currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSet {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub laser: bool,
}

impl InputSet {
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.move_left = held,
            Action::MoveRight => self.move_right = held,
            Action::Fire => self.fire = held,
            Action::Laser => self.laser = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Fire => self.fire,
            Action::Laser => self.laser,
        }
    }
}

/// Turns press/repeat/release key events into the `InputSet` for a frame.
///
/// Two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): `Release` events
///   arrive, so an action stays held until its key is released.
/// * **Classic terminals**: only `Press` events, with OS key repeat showing up
///   as more presses. An action expires `HOLD_WINDOW_FRAMES` after the last
///   one.
#[derive(Clone, Debug)]
pub struct KeyHold {
    reports_release: bool,
    last_seen: HashMap<Action, u64>,
}

impl KeyHold {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            last_seen: HashMap::new(),
        }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Record a press or repeat of `action` during `frame`.
    pub fn press(&mut self, action: Action, frame: u64) {
        self.last_seen.insert(action, frame);
    }

    pub fn release(&mut self, action: Action) {
        self.last_seen.remove(&action);
    }

    /// Actions held as of `frame`.
    pub fn held(&self, frame: u64) -> InputSet {
        let mut input = InputSet::default();
        for (&action, &last) in &self.last_seen {
            if self.reports_release || frame.saturating_sub(last) <= HOLD_WINDOW_FRAMES {
                input.set(action, true);
            }
        }
        input
    }
}
