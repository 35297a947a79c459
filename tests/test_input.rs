use crossterm::event::KeyCode;

use volley_shooter::input::{Action, InputSet, KeyHold, HOLD_WINDOW_FRAMES};

#[test]
fn arrows_and_wasd_move() {
    for code in [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')] {
        assert_eq!(Action::from_key(code), Some(Action::MoveLeft));
    }
    for code in [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')] {
        assert_eq!(Action::from_key(code), Some(Action::MoveRight));
    }
}

#[test]
fn space_fires_and_x_or_l_lasers() {
    assert_eq!(Action::from_key(KeyCode::Char(' ')), Some(Action::Fire));
    for c in ['x', 'X', 'l', 'L'] {
        assert_eq!(Action::from_key(KeyCode::Char(c)), Some(Action::Laser));
    }
}

#[test]
fn unknown_keys_are_ignored() {
    for code in [
        KeyCode::Char('z'),
        KeyCode::Char('r'),
        KeyCode::Up,
        KeyCode::Enter,
        KeyCode::F(5),
    ] {
        assert_eq!(Action::from_key(code), None, "{:?}", code);
    }
}

#[test]
fn input_set_tracks_each_action() {
    let mut input = InputSet::default();
    assert!(!input.is_held(Action::Fire));

    input.set(Action::Fire, true);
    assert!(input.is_held(Action::Fire));
    assert!(!input.is_held(Action::Laser));

    input.set(Action::Fire, false);
    assert_eq!(input, InputSet::default());

    let both = InputSet::default().with(Action::MoveLeft).with(Action::Laser);
    assert!(both.move_left && both.laser);
    assert!(!both.move_right && !both.fire);
}

// ── KeyHold ───────────────────────────────────────────────────────────────────

#[test]
fn held_key_survives_the_os_repeat_delay_without_release_events() {
    let mut keys = KeyHold::new(false);
    keys.press(Action::Fire, 1);

    // Classic terminals send nothing until the first repeat, ~600 ms in.
    for frame in 1..=31 {
        assert!(keys.held(frame).fire, "fire dropped at frame {}", frame);
    }
}

#[test]
fn held_key_expires_after_the_window_without_release_events() {
    let mut keys = KeyHold::new(false);
    keys.press(Action::MoveLeft, 10);

    assert!(keys.held(10 + HOLD_WINDOW_FRAMES).move_left);
    assert!(!keys.held(10 + HOLD_WINDOW_FRAMES + 1).move_left);
}

#[test]
fn repeats_keep_the_key_held() {
    let mut keys = KeyHold::new(false);
    keys.press(Action::Laser, 1);
    keys.press(Action::Laser, 1 + HOLD_WINDOW_FRAMES);
    assert!(keys.held(1 + 2 * HOLD_WINDOW_FRAMES).laser);
}

#[test]
fn held_key_never_expires_when_release_is_reported() {
    let mut keys = KeyHold::new(true);
    assert!(keys.reports_release());
    keys.press(Action::Fire, 1);

    assert!(keys.held(31).fire);
    assert!(keys.held(10_000).fire);

    keys.release(Action::Fire);
    assert!(!keys.held(10_001).fire);
}

#[test]
fn release_clears_only_that_action() {
    for reports_release in [false, true] {
        let mut keys = KeyHold::new(reports_release);
        keys.press(Action::MoveRight, 5);
        keys.press(Action::Fire, 5);
        keys.release(Action::MoveRight);

        let input = keys.held(6);
        assert!(!input.move_right);
        assert!(input.fire);
    }
}

#[test]
fn nothing_is_held_before_any_press() {
    assert_eq!(KeyHold::new(true).held(1), InputSet::default());
    assert_eq!(KeyHold::new(false).held(1), InputSet::default());
}
