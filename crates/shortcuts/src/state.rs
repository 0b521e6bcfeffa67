//! Transient UI state consulted by the escape resolver.

/// Snapshot of the UI layers that can claim an escape press.
///
/// All fields start false. A flag is set by the corresponding "opened"
/// notification and cleared either by its "closed" notification or by the
/// escape resolver when it consumes the state. There is no automatic
/// reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// A modal is believed open.
    pub modal_open: bool,
    /// The time-range picker is believed open.
    pub timepicker_open: bool,
}
