//! Key-chord model and sequence-matching registry for Gridview.
//!
//! This crate turns human-readable chord strings like `"g h"`, `"ctrl+z"`
//! or `"d shift+c"` into structured [`Chord`] values and matches a stream
//! of terminal key events against a set of registered chords.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use crossterm::event::{KeyCode, KeyEvent};
//! use gridview_keys::{BindingMode, Chord, ChordRegistry, KeyOutcome};
//!
//! let mut registry = ChordRegistry::new();
//! let chord: Chord = "g h".parse().unwrap();
//! registry.register(chord, BindingMode::Scoped, Arc::new(|| {}));
//!
//! let outcome = registry.handle_key(KeyEvent::from(KeyCode::Char('g')), false);
//! assert_eq!(outcome, KeyOutcome::Pending);
//! ```

pub mod chord;
pub mod registry;

pub use chord::{Chord, ChordError, KeyCodeName, KeyPress, ModifierFlags};
pub use registry::{BindingMode, ChordRegistry, DEFAULT_SEQUENCE_TIMEOUT, Handler, KeyOutcome};
