use std::time::{Duration, Instant};

use fontpad::shift::DOUBLE_TAP_WINDOW;
use fontpad::{Dispatcher, DispatcherBuilder, KeyboardAction, KeyboardState, ShiftState};

mod support;
use support::fixtures::{active_dispatcher, conn};
use support::mock_connection::MockConnection;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn press(state: &KeyboardState, at: Instant) -> KeyboardState {
    state.press_shift(at, DOUBLE_TAP_WINDOW)
}

#[test]
fn first_press_shifts() {
    let t0 = Instant::now();
    let s = press(&KeyboardState::new(), t0);
    assert_eq!(s.shift_state, ShiftState::Shifted);
    assert_eq!(s.last_shift_press, Some(t0));
}

#[test]
fn double_tap_locks_caps() {
    let t0 = Instant::now();
    let s = press(&KeyboardState::new(), t0);
    let s = press(&s, t0 + ms(120));
    assert_eq!(s.shift_state, ShiftState::CapsLock);
}

#[test]
fn slow_second_tap_cancels_shift() {
    let t0 = Instant::now();
    let s = press(&KeyboardState::new(), t0);
    let s = press(&s, t0 + ms(300));
    assert_eq!(s.shift_state, ShiftState::Off);
}

#[test]
fn tap_just_inside_window_locks() {
    let t0 = Instant::now();
    let s = press(&KeyboardState::new(), t0);
    let s = press(&s, t0 + ms(299));
    assert_eq!(s.shift_state, ShiftState::CapsLock);
}

#[test]
fn caps_lock_turns_off_at_any_spacing() {
    let t0 = Instant::now();
    let locked = press(&press(&KeyboardState::new(), t0), t0 + ms(50));
    assert_eq!(locked.shift_state, ShiftState::CapsLock);

    assert_eq!(press(&locked, t0 + ms(60)).shift_state, ShiftState::Off);
    assert_eq!(press(&locked, t0 + ms(5_000)).shift_state, ShiftState::Off);
}

#[test]
fn quick_tap_after_caps_off_shifts_again() {
    // off -> shifted -> caps -> off -> shifted, all within the window
    let t0 = Instant::now();
    let mut s = KeyboardState::new();
    let mut seen = Vec::new();
    for i in 0..4 {
        s = press(&s, t0 + ms(i * 100));
        seen.push(s.shift_state);
    }
    assert_eq!(
        seen,
        vec![
            ShiftState::Shifted,
            ShiftState::CapsLock,
            ShiftState::Off,
            ShiftState::Shifted
        ]
    );
}

#[test]
fn consume_only_affects_shifted() {
    let t0 = Instant::now();
    let shifted = press(&KeyboardState::new(), t0);
    assert_eq!(shifted.consume_shift().shift_state, ShiftState::Off);

    let off = KeyboardState::new();
    assert_eq!(off.consume_shift(), off);

    let locked = press(&shifted, t0 + ms(10));
    assert_eq!(locked.consume_shift(), locked);
}

#[test]
fn shift_does_not_touch_layout() {
    let t0 = Instant::now();
    let s = KeyboardState::new().switch_layout(fontpad::KeyboardLayout::Symbol2);
    let s = press(&s, t0);
    assert_eq!(s.current_layout, fontpad::KeyboardLayout::Symbol2);
}

#[test]
fn shifted_commit_uppercases_once() {
    let (mut d, _dir) = active_dispatcher();
    d.handle_action(KeyboardAction::Shift);
    d.commit_key("hello");
    assert_eq!(d.state().shift_state, ShiftState::Off);
    d.commit_key("x");
    assert_eq!(conn(&d).committed_text(), vec!["HELLO", "x"]);
}

#[test]
fn caps_lock_uppercases_until_released() {
    let (mut d, _dir) = active_dispatcher();
    let t0 = Instant::now();
    d.handle_action_at(KeyboardAction::Shift, t0);
    d.handle_action_at(KeyboardAction::Shift, t0 + ms(100));
    d.commit_key("a");
    d.commit_key("b");
    assert_eq!(d.state().shift_state, ShiftState::CapsLock);
    d.handle_action_at(KeyboardAction::Shift, t0 + ms(2_000));
    d.commit_key("c");
    assert_eq!(conn(&d).text(), "ABc");
}

#[test]
fn custom_double_tap_window_is_honoured() {
    let (d, _dir) = support::fixtures::dispatcher();
    let mut d: Dispatcher<MockConnection> =
        DispatcherBuilder::new(d.clipboard().clone(), d.fonts().clone())
            .double_tap_window(ms(500))
            .build();
    let t0 = Instant::now();
    d.handle_action_at(KeyboardAction::Shift, t0);
    d.handle_action_at(KeyboardAction::Shift, t0 + ms(400));
    assert_eq!(d.state().shift_state, ShiftState::CapsLock);
}
