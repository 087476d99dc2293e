//! Input events
//!
//! Platform-independent mouse and keyboard events fed to a
//! [`Frame`](crate::frame::Frame), either by the window runner or by
//! hand when driving a frame headlessly.

use glam::Vec2;
use std::fmt;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Special keys
    Escape,
    Tab,
    Space,
    Return,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    PrintScreen,
    Pause,

    // Punctuation
    Comma,
    Period,
    Slash,
    Semicolon,
    Quote,
    Backquote,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,

    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Modifier keys
    Shift,
    Control,
    Alt,
}

const LETTERS: [Key; 26] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Key0,
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

const PUNCTUATION: [(char, Key); 11] = [
    (',', Key::Comma),
    ('.', Key::Period),
    ('/', Key::Slash),
    (';', Key::Semicolon),
    ('\'', Key::Quote),
    ('`', Key::Backquote),
    ('-', Key::Minus),
    ('=', Key::Equals),
    ('[', Key::LeftBracket),
    (']', Key::RightBracket),
    ('\\', Key::Backslash),
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
];

impl Key {
    /// Key for a typed character, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        match c {
            'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
            '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            '\t' => Some(Key::Tab),
            '\r' | '\n' => Some(Key::Return),
            _ => PUNCTUATION
                .iter()
                .find(|&&(ch, _)| ch == c)
                .map(|&(_, key)| key),
        }
    }

    /// Conventional lowercase key name, e.g. `"a"`, `"space"`,
    /// `"print screen"`.
    pub fn name(self) -> &'static str {
        const LETTER_NAMES: [&str; 26] = [
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
            "r", "s", "t", "u", "v", "w", "x", "y", "z",
        ];
        const DIGIT_NAMES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        const FUNCTION_NAMES: [&str; 12] = [
            "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
        ];

        if let Some(i) = LETTERS.iter().position(|&k| k == self) {
            return LETTER_NAMES[i];
        }
        if let Some(i) = DIGITS.iter().position(|&k| k == self) {
            return DIGIT_NAMES[i];
        }
        if let Some(i) = FUNCTION_KEYS.iter().position(|&k| k == self) {
            return FUNCTION_NAMES[i];
        }
        match self {
            Key::Escape => "escape",
            Key::Tab => "tab",
            Key::Space => "space",
            Key::Return => "return",
            Key::Backspace => "backspace",
            Key::Delete => "delete",
            Key::Insert => "insert",
            Key::Home => "home",
            Key::End => "end",
            Key::PageUp => "page up",
            Key::PageDown => "page down",
            Key::PrintScreen => "print screen",
            Key::Pause => "pause",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Backquote => "`",
            Key::Minus => "-",
            Key::Equals => "=",
            Key::LeftBracket => "[",
            Key::RightBracket => "]",
            Key::Backslash => "\\",
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::Shift => "shift",
            Key::Control => "ctrl",
            Key::Alt => "alt",
            _ => "unknown",
        }
    }

    /// Convert from a winit key event's logical and physical key.
    ///
    /// Characters without a key of their own, such as `!` typed as
    /// shift+1, fall back to the physical key.
    #[cfg(feature = "window")]
    pub fn from_winit(
        logical: &winit::keyboard::Key,
        physical: winit::keyboard::PhysicalKey,
    ) -> Option<Self> {
        use winit::keyboard::{Key as WKey, PhysicalKey};

        let key = match logical {
            WKey::Character(c) => c.chars().next().and_then(Self::from_char),
            WKey::Named(named) => Self::from_named(*named),
            _ => None,
        };
        key.or(match physical {
            PhysicalKey::Code(code) => Self::from_key_code(code),
            PhysicalKey::Unidentified(_) => None,
        })
    }

    #[cfg(feature = "window")]
    fn from_named(named: winit::keyboard::NamedKey) -> Option<Self> {
        use winit::keyboard::NamedKey;

        match named {
            NamedKey::Escape => Some(Key::Escape),
            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Space => Some(Key::Space),
            NamedKey::Enter => Some(Key::Return),
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Delete => Some(Key::Delete),
            NamedKey::Insert => Some(Key::Insert),
            NamedKey::Home => Some(Key::Home),
            NamedKey::End => Some(Key::End),
            NamedKey::PageUp => Some(Key::PageUp),
            NamedKey::PageDown => Some(Key::PageDown),
            NamedKey::PrintScreen => Some(Key::PrintScreen),
            NamedKey::Pause => Some(Key::Pause),
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::Shift => Some(Key::Shift),
            NamedKey::Control => Some(Key::Control),
            NamedKey::Alt => Some(Key::Alt),
            NamedKey::F1 => Some(Key::F1),
            NamedKey::F2 => Some(Key::F2),
            NamedKey::F3 => Some(Key::F3),
            NamedKey::F4 => Some(Key::F4),
            NamedKey::F5 => Some(Key::F5),
            NamedKey::F6 => Some(Key::F6),
            NamedKey::F7 => Some(Key::F7),
            NamedKey::F8 => Some(Key::F8),
            NamedKey::F9 => Some(Key::F9),
            NamedKey::F10 => Some(Key::F10),
            NamedKey::F11 => Some(Key::F11),
            NamedKey::F12 => Some(Key::F12),
            _ => None,
        }
    }

    /// Character keys by physical position on a US layout.
    #[cfg(feature = "window")]
    fn from_key_code(code: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode;

        let c = match code {
            KeyCode::KeyA => 'a',
            KeyCode::KeyB => 'b',
            KeyCode::KeyC => 'c',
            KeyCode::KeyD => 'd',
            KeyCode::KeyE => 'e',
            KeyCode::KeyF => 'f',
            KeyCode::KeyG => 'g',
            KeyCode::KeyH => 'h',
            KeyCode::KeyI => 'i',
            KeyCode::KeyJ => 'j',
            KeyCode::KeyK => 'k',
            KeyCode::KeyL => 'l',
            KeyCode::KeyM => 'm',
            KeyCode::KeyN => 'n',
            KeyCode::KeyO => 'o',
            KeyCode::KeyP => 'p',
            KeyCode::KeyQ => 'q',
            KeyCode::KeyR => 'r',
            KeyCode::KeyS => 's',
            KeyCode::KeyT => 't',
            KeyCode::KeyU => 'u',
            KeyCode::KeyV => 'v',
            KeyCode::KeyW => 'w',
            KeyCode::KeyX => 'x',
            KeyCode::KeyY => 'y',
            KeyCode::KeyZ => 'z',
            KeyCode::Digit0 => '0',
            KeyCode::Digit1 => '1',
            KeyCode::Digit2 => '2',
            KeyCode::Digit3 => '3',
            KeyCode::Digit4 => '4',
            KeyCode::Digit5 => '5',
            KeyCode::Digit6 => '6',
            KeyCode::Digit7 => '7',
            KeyCode::Digit8 => '8',
            KeyCode::Digit9 => '9',
            KeyCode::Comma => ',',
            KeyCode::Period => '.',
            KeyCode::Slash => '/',
            KeyCode::Semicolon => ';',
            KeyCode::Quote => '\'',
            KeyCode::Backquote => '`',
            KeyCode::Minus => '-',
            KeyCode::Equal => '=',
            KeyCode::BracketLeft => '[',
            KeyCode::BracketRight => ']',
            KeyCode::Backslash => '\\',
            _ => return None,
        };
        Self::from_char(c)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window was asked to close.
    Quit,

    /// Mouse button pressed at a window position.
    MousePress { button: MouseButton, position: Vec2 },

    /// Mouse button released.
    MouseRelease { button: MouseButton, position: Vec2 },

    /// Mouse moved.
    MouseMotion { position: Vec2 },

    /// Key pressed.
    KeyPress { key: Key },

    /// Key released.
    KeyRelease { key: Key },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::A.name(), "a");
        assert_eq!(Key::Z.name(), "z");
        assert_eq!(Key::Key7.name(), "7");
        assert_eq!(Key::F10.name(), "f10");
        assert_eq!(Key::Return.name(), "return");
        assert_eq!(Key::PrintScreen.to_string(), "print screen");
        assert_eq!(Key::PageUp.name(), "page up");
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('q'), Some(Key::Q));
        assert_eq!(Key::from_char('Q'), Some(Key::Q));
        assert_eq!(Key::from_char('3'), Some(Key::Key3));
        assert_eq!(Key::from_char(' '), Some(Key::Space));
        assert_eq!(Key::from_char('%'), None);
        assert_eq!(Key::from_char('!'), None);
    }

    #[test]
    fn test_punctuation_keys() {
        for (c, key) in PUNCTUATION {
            assert_eq!(Key::from_char(c), Some(key));
            assert_eq!(key.name(), c.to_string());
        }
        assert_eq!(Key::from_char(','), Some(Key::Comma));
        assert_eq!(Key::Minus.to_string(), "-");
        assert_eq!(Key::Backslash.name(), "\\");
    }

    #[test]
    fn test_every_key_has_a_name() {
        let mut keys: Vec<Key> = Vec::new();
        keys.extend(LETTERS);
        keys.extend(DIGITS);
        keys.extend(FUNCTION_KEYS);
        keys.extend(PUNCTUATION.map(|(_, key)| key));
        for key in keys {
            assert_ne!(key.name(), "unknown");
        }
    }

    #[cfg(feature = "window")]
    #[test]
    fn test_from_winit() {
        use winit::keyboard::{Key as WKey, KeyCode, NamedKey, NativeKeyCode, PhysicalKey};

        let unidentified = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        let code = PhysicalKey::Code;

        assert_eq!(
            Key::from_winit(&WKey::Character("x".into()), code(KeyCode::KeyX)),
            Some(Key::X)
        );
        assert_eq!(
            Key::from_winit(&WKey::Named(NamedKey::PrintScreen), code(KeyCode::PrintScreen)),
            Some(Key::PrintScreen)
        );
        assert_eq!(
            Key::from_winit(&WKey::Named(NamedKey::CapsLock), code(KeyCode::CapsLock)),
            None
        );

        assert_eq!(
            Key::from_winit(&WKey::Character(",".into()), code(KeyCode::Comma)),
            Some(Key::Comma)
        );
        assert_eq!(
            Key::from_winit(&WKey::Character(",".into()), unidentified),
            Some(Key::Comma)
        );
        // shift+1
        assert_eq!(
            Key::from_winit(&WKey::Character("!".into()), code(KeyCode::Digit1)),
            Some(Key::Key1)
        );
        // shift+/
        assert_eq!(
            Key::from_winit(&WKey::Character("?".into()), code(KeyCode::Slash)),
            Some(Key::Slash)
        );
        assert_eq!(Key::from_winit(&WKey::Character("!".into()), unidentified), None);
    }
}
