//! Chord parsing and identity.
//!
//! Responsibilities:
//! - Parse human-readable chord strings into structured representations.
//! - Normalize crossterm key events into the same representation so that
//!   parsed chords and physical presses compare equal.
//!
//! Does NOT handle:
//! - Handler storage or sequence matching (that's the registry module).
//!
//! Invariants:
//! - Chord identity is case-insensitive and modifier-order-insensitive.
//! - A chord is a non-empty sequence of key presses.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

/// Errors that can occur when parsing a chord string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordError {
    /// Invalid chord syntax
    #[error("invalid chord syntax: '{chord}'. Expected format like 'g h', 'ctrl+z', 'd shift+c'")]
    InvalidSyntax {
        /// The invalid chord string
        chord: String,
    },

    /// Unknown key name
    #[error("unknown key name: '{name}'")]
    UnknownKey {
        /// The unknown key name
        name: String,
    },
}

/// Key code names that can appear in a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCodeName {
    /// A character key (e.g. 'a', '1', '?')
    Char(char),
    /// Function key F1-F20
    F(u8),
    /// Escape key
    Esc,
    /// Enter/Return key
    Enter,
    /// Space key
    Space,
    /// Tab key
    Tab,
    /// BackTab (Shift+Tab) key
    BackTab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Insert key
    Insert,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
}

impl fmt::Display for KeyCodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::F(n) => write!(f, "F{}", n),
            Self::Esc => write!(f, "esc"),
            Self::Enter => write!(f, "enter"),
            Self::Space => write!(f, "space"),
            Self::Tab => write!(f, "tab"),
            Self::BackTab => write!(f, "backtab"),
            Self::Backspace => write!(f, "backspace"),
            Self::Delete => write!(f, "delete"),
            Self::Insert => write!(f, "insert"),
            Self::Home => write!(f, "home"),
            Self::End => write!(f, "end"),
            Self::PageUp => write!(f, "pageup"),
            Self::PageDown => write!(f, "pagedown"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Modifier flags for a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierFlags {
    /// Control key pressed
    pub ctrl: bool,
    /// Shift key pressed
    pub shift: bool,
    /// Alt/Option key pressed
    pub alt: bool,
}

impl ModifierFlags {
    /// True if no modifier is set.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("ctrl");
        }
        if self.shift {
            parts.push("shift");
        }
        if self.alt {
            parts.push("alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A single normalized key press: one step of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key code
    pub code: KeyCodeName,
    /// Modifier flags
    pub modifiers: ModifierFlags,
}

impl KeyPress {
    /// Build a normalized press from raw parts.
    ///
    /// Normalization rules:
    /// - character keys are lowercased
    /// - the shift flag is dropped for non-alphabetic characters, so '?'
    ///   compares equal whether or not the terminal reports shift
    /// - Tab with shift becomes BackTab, which itself carries no shift
    ///   flag (terminals disagree on reporting it)
    pub fn new(code: KeyCodeName, mut modifiers: ModifierFlags) -> Self {
        let code = match code {
            KeyCodeName::Char(c) => {
                let lower = c.to_ascii_lowercase();
                if !lower.is_ascii_alphabetic() {
                    modifiers.shift = false;
                }
                KeyCodeName::Char(lower)
            }
            KeyCodeName::Tab if modifiers.shift => KeyCodeName::BackTab,
            other => other,
        };
        if code == KeyCodeName::BackTab {
            modifiers.shift = false;
        }
        Self { code, modifiers }
    }

    /// Normalize a crossterm key event into a press.
    ///
    /// Returns `None` for key codes a chord cannot express (media keys,
    /// bare modifier presses, and the like).
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let code = match event.code {
            KeyCode::Char(' ') => KeyCodeName::Space,
            KeyCode::Char(c) => KeyCodeName::Char(c),
            KeyCode::F(n) => KeyCodeName::F(n),
            KeyCode::Esc => KeyCodeName::Esc,
            KeyCode::Enter => KeyCodeName::Enter,
            KeyCode::Tab => KeyCodeName::Tab,
            KeyCode::BackTab => KeyCodeName::BackTab,
            KeyCode::Backspace => KeyCodeName::Backspace,
            KeyCode::Delete => KeyCodeName::Delete,
            KeyCode::Insert => KeyCodeName::Insert,
            KeyCode::Home => KeyCodeName::Home,
            KeyCode::End => KeyCodeName::End,
            KeyCode::PageUp => KeyCodeName::PageUp,
            KeyCode::PageDown => KeyCodeName::PageDown,
            KeyCode::Up => KeyCodeName::Up,
            KeyCode::Down => KeyCodeName::Down,
            KeyCode::Left => KeyCodeName::Left,
            KeyCode::Right => KeyCodeName::Right,
            _ => return None,
        };
        let modifiers = ModifierFlags {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        };
        Some(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}+{}", self.modifiers, self.code)
        }
    }
}

/// An ordered sequence of one or more key presses identifying a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord(Vec<KeyPress>);

impl Chord {
    /// Parse a chord string like `"g h"`, `"ctrl+z"` or `"d shift+c"`.
    ///
    /// Whitespace separates sequence steps; `+` separates modifiers within
    /// a step. Parsing is case-insensitive and modifier-order-insensitive;
    /// `mod` is an alias for `ctrl`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridview_keys::chord::Chord;
    ///
    /// let chord = Chord::parse("g h").unwrap();
    /// assert_eq!(chord.steps().len(), 2);
    ///
    /// let chord = Chord::parse("mod+s").unwrap();
    /// assert!(chord.steps()[0].modifiers.ctrl);
    /// ```
    pub fn parse(chord_str: &str) -> Result<Self, ChordError> {
        let chord_str = chord_str.trim();
        if chord_str.is_empty() {
            return Err(ChordError::InvalidSyntax {
                chord: chord_str.to_string(),
            });
        }

        let steps = chord_str
            .split_whitespace()
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?;

        if steps.is_empty() {
            return Err(ChordError::InvalidSyntax {
                chord: chord_str.to_string(),
            });
        }

        Ok(Self(steps))
    }

    /// The normalized key presses making up this chord, in press order.
    pub fn steps(&self) -> &[KeyPress] {
        &self.0
    }
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Parse one sequence step like `"ctrl+z"` or `"shift+c"`.
fn parse_step(step_str: &str) -> Result<KeyPress, ChordError> {
    let parts: Vec<&str> = step_str.split('+').map(|s| s.trim()).collect();

    let mut modifiers = ModifierFlags::default();
    let mut key_name = "";

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            // "mod" is the platform primary modifier; in a terminal that
            // is ctrl.
            "ctrl" | "mod" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            _ => {
                if key_name.is_empty() {
                    key_name = part;
                } else {
                    // Multiple non-modifier parts in one step is invalid
                    return Err(ChordError::InvalidSyntax {
                        chord: step_str.to_string(),
                    });
                }
            }
        }
    }

    if key_name.is_empty() {
        return Err(ChordError::InvalidSyntax {
            chord: step_str.to_string(),
        });
    }

    let code = parse_key_code(key_name)?;
    Ok(KeyPress::new(code, modifiers))
}

/// Parse a key code name (without modifiers).
fn parse_key_code(name: &str) -> Result<KeyCodeName, ChordError> {
    let name_lower = name.to_ascii_lowercase();

    match name_lower.as_str() {
        "esc" | "escape" => return Ok(KeyCodeName::Esc),
        "enter" | "return" => return Ok(KeyCodeName::Enter),
        "space" => return Ok(KeyCodeName::Space),
        "tab" => return Ok(KeyCodeName::Tab),
        "backtab" => return Ok(KeyCodeName::BackTab),
        "backspace" => return Ok(KeyCodeName::Backspace),
        "delete" | "del" => return Ok(KeyCodeName::Delete),
        "insert" | "ins" => return Ok(KeyCodeName::Insert),
        "home" => return Ok(KeyCodeName::Home),
        "end" => return Ok(KeyCodeName::End),
        "pageup" | "page_up" | "pgup" => return Ok(KeyCodeName::PageUp),
        "pagedown" | "page_down" | "pgdn" => return Ok(KeyCodeName::PageDown),
        "up" => return Ok(KeyCodeName::Up),
        "down" => return Ok(KeyCodeName::Down),
        "left" => return Ok(KeyCodeName::Left),
        "right" => return Ok(KeyCodeName::Right),
        _ => {}
    }

    // Function keys F1-F20
    if let Some(num_str) = name_lower.strip_prefix('f')
        && let Ok(num) = num_str.parse::<u8>()
        && (1..=20).contains(&num)
    {
        return Ok(KeyCodeName::F(num));
    }

    // Single character
    let chars: Vec<char> = name.chars().collect();
    if chars.len() == 1 {
        return Ok(KeyCodeName::Char(chars[0]));
    }

    Err(ChordError::UnknownKey {
        name: name.to_string(),
    })
}
