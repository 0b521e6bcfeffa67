//! Focus inspection capability boundary.
//!
//! The global escape guard needs to know whether a typeahead overlay or an
//! editable element currently owns the keyboard. The embedding application
//! implements this over its widget tree.

/// What kind of element currently has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedElement {
    /// A single-line text input.
    TextInput,
    /// A multi-line text area.
    TextArea,
    /// An element explicitly marked as an embedded text editor.
    EmbeddedEditor,
    /// Something focused, but nothing that owns the keyboard.
    Other,
}

impl FocusedElement {
    /// True for elements that consume plain keystrokes.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Capability for inspecting and releasing input focus.
pub trait FocusSurface: Send + Sync {
    /// True while a typeahead overlay is open anywhere in the view tree.
    fn typeahead_open(&self) -> bool;

    /// The currently focused element, or `None` when nothing special has
    /// focus.
    fn focused_element(&self) -> Option<FocusedElement>;

    /// Remove focus from the active element. No-op when nothing is
    /// focused.
    fn blur(&self);
}
