//! Escape resolver and global escape guard.
//!
//! Exactly one UI layer may consume an escape press per invocation. The
//! resolver checks layers in a fixed priority order so that one layer's
//! close action is never masked by another's.

use std::sync::Mutex;

use crate::bus::EventBus;
use crate::event::{AppEvent, PanelViewChange};
use crate::focus::FocusSurface;
use crate::location::LocationService;
use crate::state::UiState;

use super::KeybindingService;

impl KeybindingService {
    /// Escape resolver: close exactly one open UI layer.
    ///
    /// Priority order: open modal, open time picker, `editview` query
    /// param, `fullscreen` query param, `kiosk` query param.
    pub fn exit(&self) {
        exit(&self.state, &self.bus, self.location.as_ref());
    }

    /// Guard run for the global escape chord: a typeahead overlay or a
    /// focused editable element owns the press before the resolver does.
    pub fn global_esc(&self) {
        global_esc(
            self.focus.as_ref(),
            &self.state,
            &self.bus,
            self.location.as_ref(),
        );
    }
}

pub(super) fn exit(state: &Mutex<UiState>, bus: &EventBus, location: &dyn LocationService) {
    // Sampled before the emission: this service subscribes to hide-modal
    // itself, and that subscription would clear the flag mid-call.
    let modal_was_open = state.lock().expect("lock poisoned").modal_open;

    // The modal layer always gets the close signal; it is idempotent.
    bus.emit(AppEvent::HideModal);

    if modal_was_open {
        state.lock().expect("lock poisoned").modal_open = false;
        return;
    }

    let timepicker_was_open = state.lock().expect("lock poisoned").timepicker_open;
    if timepicker_was_open {
        bus.emit(AppEvent::CloseTimepicker);
        state.lock().expect("lock poisoned").timepicker_open = false;
        return;
    }

    // close settings sub-view
    let mut query = location.query();
    if query.remove("editview").is_some() {
        location.set_query(query);
        return;
    }

    if query.contains("fullscreen") {
        bus.emit(AppEvent::PanelChangeView(PanelViewChange {
            fullscreen: false,
            edit: Some(false),
            panel_id: None,
            toggle: false,
        }));
        return;
    }

    if query.contains("kiosk") {
        bus.emit(AppEvent::ToggleKioskMode { exit: true });
    }
}

pub(super) fn global_esc(
    focus: &dyn FocusSurface,
    state: &Mutex<UiState>,
    bus: &EventBus,
    location: &dyn LocationService,
) {
    // an open typeahead owns its own escape handling
    if focus.typeahead_open() {
        return;
    }

    // a focused editable element is blurred, nothing else closes
    if let Some(element) = focus.focused_element()
        && element.is_editable()
    {
        focus.blur();
        return;
    }

    // no focused input or editor blocks this; resolve the exit
    exit(state, bus, location);
}
