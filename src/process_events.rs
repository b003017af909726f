use raylib::prelude::*;

use crate::game::input::{Key, KeyEvent};

fn digit(key: KeyboardKey) -> Option<char> {
    use KeyboardKey::*;
    let c = match key {
        KEY_ZERO | KEY_KP_0 => '0',
        KEY_ONE | KEY_KP_1 => '1',
        KEY_TWO | KEY_KP_2 => '2',
        KEY_THREE | KEY_KP_3 => '3',
        KEY_FOUR | KEY_KP_4 => '4',
        KEY_FIVE | KEY_KP_5 => '5',
        KEY_SIX | KEY_KP_6 => '6',
        KEY_SEVEN | KEY_KP_7 => '7',
        KEY_EIGHT | KEY_KP_8 => '8',
        KEY_NINE | KEY_KP_9 => '9',
        _ => return None,
    };
    Some(c)
}

fn key_event(key: KeyboardKey) -> Option<KeyEvent> {
    if let Some(c) = digit(key) {
        return Some(KeyEvent::char(c));
    }
    let event = match key {
        KeyboardKey::KEY_BACKSPACE => KeyEvent::new(Key::Backspace, None),
        KeyboardKey::KEY_ENTER => KeyEvent::new(Key::Enter, None),
        KeyboardKey::KEY_KP_ENTER => KeyEvent::new(Key::KeypadEnter, None),
        KeyboardKey::KEY_ESCAPE => KeyEvent::new(Key::Escape, None),
        KeyboardKey::KEY_Q => KeyEvent::char('q'),
        _ => return None,
    };
    Some(event)
}

/// Maps raw key presses to game events, keeping press order.
pub fn key_events(keys: &[KeyboardKey]) -> Vec<KeyEvent> {
    keys.iter().copied().filter_map(key_event).collect()
}

/// Drains this frame's key queue in press order.
pub fn process_events(window: &mut RaylibHandle) -> Vec<KeyEvent> {
    let mut keys = Vec::new();
    while let Some(key) = window.get_key_pressed() {
        keys.push(key);
    }
    // Characters are already covered by the key queue.
    while window.get_char_pressed().is_some() {}
    key_events(&keys)
}
