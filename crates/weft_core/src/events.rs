//! Input event vocabulary
//!
//! Event payloads originate at the host shell (pointer and keyboard) and are
//! routed to element handlers by `weft_view`. The engine layer matches on
//! [`Key`] exhaustively, so keys are an enum rather than raw scan codes.

/// The kind of an input event routed through the element tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    PointerDown,
    PointerUp,
    PointerEnter,
    PointerLeave,
    Click,
    KeyDown,
    KeyUp,
    TextInput,
    FocusIn,
    FocusOut,
    Scroll,
}

/// Keyboard modifier state at event time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether any modifier is held
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Logical keyboard keys the component layer reacts to
///
/// Printable input arrives as `Char`; everything else the widgets care about
/// has a named variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Space,
    Escape,
    Tab,
    Backspace,
    Delete,
    Char(char),
}

impl Key {
    /// Whether this key commits the active option in a listbox
    pub fn is_commit(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }

    /// Whether this key produces printable text
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_keys() {
        assert!(Key::Enter.is_commit());
        assert!(Key::Space.is_commit());
        assert!(!Key::Tab.is_commit());
        assert!(!Key::Char('a').is_commit());
    }

    #[test]
    fn test_printable() {
        assert_eq!(Key::Char('x').as_char(), Some('x'));
        assert_eq!(Key::Space.as_char(), Some(' '));
        assert_eq!(Key::Escape.as_char(), None);
    }

    #[test]
    fn test_modifiers_any() {
        assert!(!Modifiers::NONE.any());
        let m = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        assert!(m.any());
    }
}
