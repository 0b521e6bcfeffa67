//! Sequence-matching chord registry.
//!
//! Responsibilities:
//! - Store chord handlers in scoped and global slots (last write wins).
//! - Match a stream of key events against registered chords, including
//!   multi-step prefix sequences like `"g h"`.
//!
//! Non-responsibilities:
//! - Deciding which chords exist (the shortcuts service owns the tables).
//! - Reading focus state (callers pass `input_focused` per key).
//!
//! Invariants:
//! - A chord holds at most one scoped and one global handler at a time.
//! - Scoped handlers never fire while an editable element has focus.
//! - A pending prefix expires after the sequence timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, trace};

use crate::chord::{Chord, KeyPress};

/// A chord handler. Handlers are cheap to clone and run on the caller's
/// thread when their chord fires.
pub type Handler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Whether a binding fires while an editable element has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Suppressed while an editable element has input focus.
    Scoped,
    /// Fires regardless of focus.
    Global,
}

/// Result of feeding one key event to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A chord matched and its handler ran.
    Fired,
    /// The keys so far are a prefix of a longer chord; waiting for more.
    Pending,
    /// No registered chord matches.
    Unbound,
}

/// Per-chord handler slots.
#[derive(Default)]
struct Slot {
    scoped: Option<Handler>,
    global: Option<Handler>,
}

impl Slot {
    fn is_empty(&self) -> bool {
        self.scoped.is_none() && self.global.is_none()
    }

    /// The handler that fires for this slot, honoring focus suppression.
    ///
    /// When a chord carries both a scoped and a global handler, the global
    /// one owns the chord: it sees the superset of contexts and is expected
    /// to delegate to the scoped behavior itself.
    fn effective(&self, input_focused: bool) -> Option<Handler> {
        if input_focused {
            self.global.clone()
        } else {
            self.global.clone().or_else(|| self.scoped.clone())
        }
    }

    fn is_candidate(&self, input_focused: bool) -> bool {
        if input_focused {
            self.global.is_some()
        } else {
            !self.is_empty()
        }
    }
}

enum Resolution {
    Matched(Handler),
    Prefix,
    NoMatch,
}

/// Default pending-sequence expiry, matching the conventional one-second
/// reset interval for multi-key shortcuts.
pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_secs(1);

/// Registry mapping chords to handlers with sequence matching.
pub struct ChordRegistry {
    bindings: HashMap<Chord, Slot>,
    pending: Vec<KeyPress>,
    pending_since: Option<Instant>,
    sequence_timeout: Duration,
}

impl Default for ChordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordRegistry {
    /// Create an empty registry with the default sequence timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_SEQUENCE_TIMEOUT)
    }

    /// Create an empty registry with a custom pending-sequence timeout.
    pub fn with_timeout(sequence_timeout: Duration) -> Self {
        Self {
            bindings: HashMap::new(),
            pending: Vec::new(),
            pending_since: None,
            sequence_timeout,
        }
    }

    /// Register a handler for a chord in the given mode.
    ///
    /// Rebinding the same chord and mode replaces the previous handler
    /// (last write wins, no stacking).
    pub fn register(&mut self, chord: Chord, mode: BindingMode, handler: Handler) {
        debug!(chord = %chord, ?mode, "registering chord");
        let slot = self.bindings.entry(chord).or_default();
        match mode {
            BindingMode::Scoped => slot.scoped = Some(handler),
            BindingMode::Global => slot.global = Some(handler),
        }
    }

    /// Remove a chord's handler for one mode, or for both when `mode` is
    /// `None`. Unknown chords are ignored.
    pub fn unregister(&mut self, chord: &Chord, mode: Option<BindingMode>) {
        if let Some(slot) = self.bindings.get_mut(chord) {
            match mode {
                Some(BindingMode::Scoped) => slot.scoped = None,
                Some(BindingMode::Global) => slot.global = None,
                None => {
                    slot.scoped = None;
                    slot.global = None;
                }
            }
            if slot.is_empty() {
                self.bindings.remove(chord);
            }
        }
    }

    /// Remove every registered chord and reset any pending sequence.
    pub fn clear_all(&mut self) {
        debug!(count = self.bindings.len(), "clearing all chords");
        self.bindings.clear();
        self.reset_pending();
    }

    /// Number of chords with at least one handler.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if no chords are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// True if the chord has a handler in the given mode.
    pub fn is_bound(&self, chord: &Chord, mode: BindingMode) -> bool {
        self.bindings.get(chord).is_some_and(|slot| match mode {
            BindingMode::Scoped => slot.scoped.is_some(),
            BindingMode::Global => slot.global.is_some(),
        })
    }

    /// Feed one key event through the registry, running the matched
    /// handler on the caller's thread.
    ///
    /// `input_focused` suppresses scoped bindings (an editable element owns
    /// the keyboard); global bindings still fire. Release events and keys a
    /// chord cannot express are reported as [`KeyOutcome::Unbound`].
    pub fn handle_key(&mut self, event: KeyEvent, input_focused: bool) -> KeyOutcome {
        let (outcome, handler) = self.advance(event, input_focused);
        if let Some(handler) = handler {
            handler();
        }
        outcome
    }

    /// Like [`handle_key`](Self::handle_key), but returns the matched
    /// handler instead of invoking it. Callers that guard the registry
    /// with a lock use this to fire the handler after releasing it, since
    /// a handler may legitimately re-enter the registry (a navigation
    /// triggering the route-change rebuild, for example).
    pub fn advance(
        &mut self,
        event: KeyEvent,
        input_focused: bool,
    ) -> (KeyOutcome, Option<Handler>) {
        if event.kind == KeyEventKind::Release {
            return (KeyOutcome::Unbound, None);
        }
        let Some(press) = KeyPress::from_event(&event) else {
            return (KeyOutcome::Unbound, None);
        };

        // Stale prefixes do not combine with fresh keys.
        if let Some(since) = self.pending_since
            && since.elapsed() > self.sequence_timeout
        {
            trace!("pending sequence expired");
            self.reset_pending();
        }

        self.pending.push(press);
        match self.resolve(input_focused) {
            Resolution::Matched(handler) => {
                trace!(keys = ?self.pending, "chord fired");
                self.reset_pending();
                (KeyOutcome::Fired, Some(handler))
            }
            Resolution::Prefix => {
                self.pending_since = Some(Instant::now());
                (KeyOutcome::Pending, None)
            }
            Resolution::NoMatch => self.retry_as_fresh_start(input_focused),
        }
    }

    /// Drop any partially entered sequence.
    pub fn reset_pending(&mut self) {
        self.pending.clear();
        self.pending_since = None;
    }

    /// A failed continuation may still start a new sequence: `g x` is dead,
    /// but the trailing `x` can open its own chord.
    fn retry_as_fresh_start(&mut self, input_focused: bool) -> (KeyOutcome, Option<Handler>) {
        if self.pending.len() <= 1 {
            self.reset_pending();
            return (KeyOutcome::Unbound, None);
        }
        let Some(last) = self.pending.pop() else {
            self.reset_pending();
            return (KeyOutcome::Unbound, None);
        };
        self.pending.clear();
        self.pending.push(last);
        match self.resolve(input_focused) {
            Resolution::Matched(handler) => {
                self.reset_pending();
                (KeyOutcome::Fired, Some(handler))
            }
            Resolution::Prefix => {
                self.pending_since = Some(Instant::now());
                (KeyOutcome::Pending, None)
            }
            Resolution::NoMatch => {
                self.reset_pending();
                (KeyOutcome::Unbound, None)
            }
        }
    }

    /// Match the pending presses against the candidate chords. An exact
    /// match wins immediately over a longer chord sharing the same prefix.
    fn resolve(&self, input_focused: bool) -> Resolution {
        let mut saw_prefix = false;
        for (chord, slot) in &self.bindings {
            if !slot.is_candidate(input_focused) {
                continue;
            }
            let steps = chord.steps();
            if steps == self.pending.as_slice() {
                if let Some(handler) = slot.effective(input_focused) {
                    return Resolution::Matched(handler);
                }
            } else if steps.len() > self.pending.len() && steps.starts_with(&self.pending) {
                saw_prefix = true;
            }
        }
        if saw_prefix {
            Resolution::Prefix
        } else {
            Resolution::NoMatch
        }
    }
}
