//! Keybinding dispatch service for the Gridview dashboard TUI.
//!
//! This crate maps key-chord sequences to application commands and
//! resolves which binding applies given the transient UI state: an open
//! modal, an open time-range picker, the focused element, and the current
//! URL query. The surrounding application is reached only through
//! capability traits ([`LocationService`], [`FocusSurface`],
//! [`DashboardHandle`], [`UserContext`], [`ExploreGateway`]) and the
//! notification bus, so the service can be driven and tested without any
//! concrete UI.
//!
//! The main entry points are [`KeybindingService::new`] (installs the
//! global command table), [`KeybindingService::setup_dashboard_bindings`]
//! (installs the dashboard command set for the active view), and
//! [`KeybindingService::handle_key`] (feeds a terminal key event through
//! the registry).

pub mod bus;
pub mod dashboard;
pub mod event;
pub mod explore;
pub mod focus;
pub mod location;
pub mod service;
pub mod state;

pub use bus::EventBus;
pub use dashboard::{
    DashboardHandle, LegendOptions, Panel, PanelId, PanelInfo, SharedDashboard, Target,
    TooltipMode,
};
pub use event::{AppEvent, EventKind, ModalKind, PanelViewChange};
pub use explore::{DataSourceRef, Datasource, ExploreGateway, UserContext};
pub use focus::{FocusSurface, FocusedElement};
pub use location::{LocationService, UrlQuery, strip_base_from_url};
pub use service::{
    KeybindingService, ServiceOptions, keybinding_service, set_keybinding_service,
    try_keybinding_service,
};
pub use state::UiState;

// Chord-level types callers interact with directly.
pub use gridview_keys::{BindingMode, Chord, ChordError, KeyOutcome};
