//! The global and dashboard-scoped command tables.
//!
//! Responsibilities:
//! - Install the fixed application-wide chords and the dashboard command
//!   set into the registry.
//!
//! Invariants:
//! - Dashboard handlers read the shared dashboard handle at fire time,
//!   never a copy taken at registration time.
//! - The explore chord is installed only when the capability check grants
//!   access at registration time.

use std::sync::Arc;

use gridview_keys::ChordError;
use tracing::debug;

use crate::dashboard::SharedDashboard;
use crate::event::{AppEvent, ModalKind, PanelViewChange};

use super::{KeybindingService, escape};

impl KeybindingService {
    /// Install the application-wide chords. Idempotent: rebinding replaces.
    ///
    /// No shortcuts are installed on the login route.
    pub fn setup_global_bindings(&self) -> Result<(), ChordError> {
        if self.location.path() == self.options.login_path {
            return Ok(());
        }

        for chord in ["?", "h"] {
            let bus = Arc::clone(&self.bus);
            self.bind(chord, move || {
                bus.emit(AppEvent::ShowModal(ModalKind::Help));
            })?;
        }

        let location = Arc::clone(&self.location);
        self.bind("g h", move || location.navigate("/"))?;

        let location = Arc::clone(&self.location);
        self.bind("g a", move || location.navigate("/alerting"))?;

        let location = Arc::clone(&self.location);
        self.bind("g p", move || location.navigate("/profile"))?;

        for chord in ["s o", "f"] {
            let bus = Arc::clone(&self.bus);
            self.bind(chord, move || bus.emit(AppEvent::ShowDashSearch))?;
        }

        let state = Arc::clone(&self.state);
        let bus = Arc::clone(&self.bus);
        let location = Arc::clone(&self.location);
        self.bind("esc", move || {
            escape::exit(&state, &bus, location.as_ref());
        })?;

        let focus = Arc::clone(&self.focus);
        let state = Arc::clone(&self.state);
        let bus = Arc::clone(&self.bus);
        let location = Arc::clone(&self.location);
        self.bind_global("esc", move || {
            escape::global_esc(focus.as_ref(), &state, &bus, location.as_ref());
        })?;

        Ok(())
    }

    /// Install the dashboard-scoped command set.
    ///
    /// Called by the dashboard view once its handle exists; the bindings
    /// are torn down with everything else on the next route change.
    pub fn setup_dashboard_bindings(&self, dashboard: SharedDashboard) -> Result<(), ChordError> {
        // cycle graph tooltip mode
        let dash = Arc::clone(&dashboard);
        let bus = Arc::clone(&self.bus);
        self.bind("mod+o", move || {
            {
                let mut dash = dash.lock().expect("lock poisoned");
                let next = dash.graph_tooltip().next();
                dash.set_graph_tooltip(next);
            }
            bus.emit(AppEvent::GraphHoverClear);
            dash.lock().expect("lock poisoned").start_refresh();
        })?;

        let bus = Arc::clone(&self.bus);
        self.bind("mod+s", move || bus.emit(AppEvent::SaveDashboard))?;

        for chord in ["t z", "ctrl+z"] {
            let bus = Arc::clone(&self.bus);
            self.bind(chord, move || bus.emit(AppEvent::ZoomOut(2)))?;
        }

        let bus = Arc::clone(&self.bus);
        self.bind("t left", move || bus.emit(AppEvent::ShiftTime(-1)))?;

        let bus = Arc::clone(&self.bus);
        self.bind("t right", move || bus.emit(AppEvent::ShiftTime(1)))?;

        // edit panel
        let dash = Arc::clone(&dashboard);
        let bus = Arc::clone(&self.bus);
        self.bind("e", move || {
            let (focused, can_edit) = {
                let dash = dash.lock().expect("lock poisoned");
                (dash.focus_panel_id(), dash.can_edit())
            };
            if let Some(panel_id) = focused
                && can_edit
            {
                bus.emit(AppEvent::PanelChangeView(PanelViewChange {
                    fullscreen: true,
                    edit: Some(true),
                    panel_id: Some(panel_id),
                    toggle: true,
                }));
            }
        })?;

        // view panel
        let dash = Arc::clone(&dashboard);
        let bus = Arc::clone(&self.bus);
        self.bind("v", move || {
            let focused = dash.lock().expect("lock poisoned").focus_panel_id();
            if let Some(panel_id) = focused {
                bus.emit(AppEvent::PanelChangeView(PanelViewChange {
                    fullscreen: true,
                    edit: None,
                    panel_id: Some(panel_id),
                    toggle: true,
                }));
            }
        })?;

        // jump to explore if permissions allow
        if self.user.has_access_to_explore() {
            let dash = Arc::clone(&dashboard);
            let explore = Arc::clone(&self.explore);
            let location = Arc::clone(&self.location);
            self.bind("x", move || {
                let panel = {
                    let dash = dash.lock().expect("lock poisoned");
                    dash.focus_panel_id().and_then(|id| dash.panel_by_id(id))
                };
                let Some(panel) = panel else {
                    return;
                };
                let explore = Arc::clone(&explore);
                let location = Arc::clone(&location);
                tokio::spawn(async move {
                    let Some(datasource) =
                        explore.resolve_datasource(panel.datasource.as_ref()).await
                    else {
                        debug!(panel = %panel.id, "explore jump: no datasource resolved");
                        return;
                    };
                    let Some(url) = explore.build_explore_url(&panel, &datasource).await else {
                        debug!(panel = %panel.id, "explore jump: nothing explorable");
                        return;
                    };
                    let Some(path) = location.strip_base(&url) else {
                        debug!(panel = %panel.id, "explore jump: empty path after base strip");
                        return;
                    };
                    // navigate on the next scheduling tick
                    tokio::task::yield_now().await;
                    location.navigate(&path);
                });
            })?;
        }

        // delete panel
        let dash = Arc::clone(&dashboard);
        let bus = Arc::clone(&self.bus);
        self.bind("p r", move || {
            let (focused, can_edit) = {
                let dash = dash.lock().expect("lock poisoned");
                (dash.focus_panel_id(), dash.can_edit())
            };
            if let Some(panel_id) = focused
                && can_edit
            {
                bus.emit(AppEvent::RemovePanel(panel_id));
                dash.lock().expect("lock poisoned").set_focus_panel(None);
            }
        })?;

        // duplicate panel
        let dash = Arc::clone(&dashboard);
        self.bind("p d", move || {
            let mut dash = dash.lock().expect("lock poisoned");
            if let Some(panel_id) = dash.focus_panel_id()
                && dash.can_edit()
                && let Some(info) = dash.panel_info_by_id(panel_id)
            {
                dash.duplicate_panel(info.index);
            }
        })?;

        // share panel
        let dash = Arc::clone(&dashboard);
        let bus = Arc::clone(&self.bus);
        self.bind("p s", move || {
            let focused = {
                let dash = dash.lock().expect("lock poisoned");
                dash.focus_panel_id().and_then(|id| dash.panel_info_by_id(id))
            };
            if let Some(info) = focused {
                bus.emit(AppEvent::ShowModal(ModalKind::SharePanel {
                    panel_id: info.panel.id,
                }));
            }
        })?;

        // toggle panel legend
        let dash = Arc::clone(&dashboard);
        self.bind("p l", move || {
            let mut dash = dash.lock().expect("lock poisoned");
            if let Some(panel_id) = dash.focus_panel_id()
                && dash
                    .panel_info_by_id(panel_id)
                    .is_some_and(|info| info.panel.legend.is_some())
            {
                dash.toggle_panel_legend(panel_id);
            }
        })?;

        // toggle all panel legends
        let dash = Arc::clone(&dashboard);
        self.bind("d l", move || {
            dash.lock().expect("lock poisoned").toggle_legends_for_all();
        })?;

        // collapse all rows
        let dash = Arc::clone(&dashboard);
        self.bind("d shift+c", move || {
            dash.lock().expect("lock poisoned").collapse_rows();
        })?;

        // expand all rows
        let dash = Arc::clone(&dashboard);
        self.bind("d shift+e", move || {
            dash.lock().expect("lock poisoned").expand_rows();
        })?;

        let location = Arc::clone(&self.location);
        self.bind("d n", move || location.navigate("/dashboard/new"))?;

        let dash = Arc::clone(&dashboard);
        self.bind("d r", move || {
            dash.lock().expect("lock poisoned").start_refresh();
        })?;

        // open settings view
        let location = Arc::clone(&self.location);
        self.bind("d s", move || {
            let mut query = location.query();
            query.insert("editview", "settings");
            location.set_query(query);
        })?;

        let bus = Arc::clone(&self.bus);
        self.bind("d k", move || {
            bus.emit(AppEvent::ToggleKioskMode { exit: false });
        })?;

        let bus = Arc::clone(&self.bus);
        self.bind("d v", move || bus.emit(AppEvent::ToggleViewMode))?;

        // autofit panels; requires a full reload, add-only like a raw
        // href append
        let location = Arc::clone(&self.location);
        self.bind("d a", move || {
            let mut query = location.query();
            if !query.contains("autofitpanels") {
                query.insert("autofitpanels", "");
                location.set_query(query);
            }
        })?;

        Ok(())
    }
}
