//! Application notifications carried by the event bus.
//!
//! Responsibilities:
//! - Define the typed notification vocabulary shared between the
//!   keybinding service and the rest of the application.
//!
//! Non-responsibilities:
//! - Delivery (that's the bus module).
//! - Acting on notifications (subscribers own their side effects).

use crate::dashboard::PanelId;

/// Which modal a show-modal notification opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    /// The keyboard-shortcut help modal.
    Help,
    /// The share dialog for a specific panel.
    SharePanel {
        /// Panel being shared
        panel_id: PanelId,
    },
}

/// Payload for a panel view change (fullscreen/edit transitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelViewChange {
    /// Target fullscreen state
    pub fullscreen: bool,
    /// Target edit state; `None` leaves the current edit state alone
    pub edit: Option<bool>,
    /// Panel the change applies to; `None` means the active view
    pub panel_id: Option<PanelId>,
    /// Toggle semantics: a second identical request reverts the view
    pub toggle: bool,
}

/// Notifications exchanged over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Open a modal.
    ShowModal(ModalKind),
    /// Close whatever modal is open. Idempotent.
    HideModal,
    /// The time-range picker opened.
    TimepickerOpened,
    /// The time-range picker closed.
    TimepickerClosed,
    /// Ask the time-range picker to close.
    CloseTimepicker,
    /// Open the dashboard search overlay.
    ShowDashSearch,
    /// Change a panel's view state.
    PanelChangeView(PanelViewChange),
    /// Clear any shared graph hover marker.
    GraphHoverClear,
    /// Remove a panel from the dashboard.
    RemovePanel(PanelId),
    /// Toggle kiosk mode; `exit` forces leaving it.
    ToggleKioskMode {
        /// Force-exit kiosk mode instead of cycling
        exit: bool,
    },
    /// Toggle TV/view mode.
    ToggleViewMode,
    /// Save the current dashboard.
    SaveDashboard,
    /// Zoom the time range out by the given factor.
    ZoomOut(u32),
    /// Shift the time range by the given number of steps.
    ShiftTime(i64),
    /// The route changed; path of the new route.
    RouteChanged {
        /// New route path
        path: String,
    },
}

/// Discriminant used for subscription routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ShowModal,
    HideModal,
    TimepickerOpened,
    TimepickerClosed,
    CloseTimepicker,
    ShowDashSearch,
    PanelChangeView,
    GraphHoverClear,
    RemovePanel,
    ToggleKioskMode,
    ToggleViewMode,
    SaveDashboard,
    ZoomOut,
    ShiftTime,
    RouteChanged,
}

impl AppEvent {
    /// The subscription kind this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ShowModal(_) => EventKind::ShowModal,
            Self::HideModal => EventKind::HideModal,
            Self::TimepickerOpened => EventKind::TimepickerOpened,
            Self::TimepickerClosed => EventKind::TimepickerClosed,
            Self::CloseTimepicker => EventKind::CloseTimepicker,
            Self::ShowDashSearch => EventKind::ShowDashSearch,
            Self::PanelChangeView(_) => EventKind::PanelChangeView,
            Self::GraphHoverClear => EventKind::GraphHoverClear,
            Self::RemovePanel(_) => EventKind::RemovePanel,
            Self::ToggleKioskMode { .. } => EventKind::ToggleKioskMode,
            Self::ToggleViewMode => EventKind::ToggleViewMode,
            Self::SaveDashboard => EventKind::SaveDashboard,
            Self::ZoomOut(_) => EventKind::ZoomOut,
            Self::ShiftTime(_) => EventKind::ShiftTime,
            Self::RouteChanged { .. } => EventKind::RouteChanged,
        }
    }
}
