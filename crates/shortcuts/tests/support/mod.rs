//! Shared capability fakes for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use gridview_shortcuts::{
    AppEvent, DashboardHandle, DataSourceRef, Datasource, EventBus, EventKind, ExploreGateway,
    FocusSurface, FocusedElement, KeybindingService, LocationService, Panel, PanelId, PanelInfo,
    TooltipMode, UrlQuery, UserContext,
};

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c.to_ascii_uppercase()), KeyModifiers::SHIFT)
}

pub fn esc_key() -> KeyEvent {
    KeyEvent::from(KeyCode::Esc)
}

pub fn left_key() -> KeyEvent {
    KeyEvent::from(KeyCode::Left)
}

pub fn right_key() -> KeyEvent {
    KeyEvent::from(KeyCode::Right)
}

/// Records every event emitted on the bus.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl EventLog {
    const ALL_KINDS: &'static [EventKind] = &[
        EventKind::ShowModal,
        EventKind::HideModal,
        EventKind::TimepickerOpened,
        EventKind::TimepickerClosed,
        EventKind::CloseTimepicker,
        EventKind::ShowDashSearch,
        EventKind::PanelChangeView,
        EventKind::GraphHoverClear,
        EventKind::RemovePanel,
        EventKind::ToggleKioskMode,
        EventKind::ToggleViewMode,
        EventKind::SaveDashboard,
        EventKind::ZoomOut,
        EventKind::ShiftTime,
        EventKind::RouteChanged,
    ];

    pub fn attach(bus: &EventBus) -> Self {
        let log = Self::default();
        for kind in Self::ALL_KINDS {
            let events = Arc::clone(&log.events);
            bus.subscribe(*kind, move |event| {
                events.lock().expect("lock poisoned").push(event.clone());
            });
        }
        log
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<AppEvent> {
        std::mem::take(&mut *self.events.lock().expect("lock poisoned"))
    }
}

#[derive(Default)]
struct LocationState {
    path: String,
    query: UrlQuery,
    navigations: Vec<String>,
    query_sets: Vec<UrlQuery>,
}

/// In-memory location with recorded navigations and query replacements.
pub struct FakeLocation {
    state: Mutex<LocationState>,
    base: String,
}

impl FakeLocation {
    pub fn at(path: &str) -> Self {
        Self {
            state: Mutex::new(LocationState {
                path: path.to_string(),
                ..LocationState::default()
            }),
            base: String::new(),
        }
    }

    pub fn with_base(path: &str, base: &str) -> Self {
        let mut location = Self::at(path);
        location.base = base.to_string();
        location
    }

    pub fn set_current_query(&self, query: UrlQuery) {
        self.state.lock().expect("lock poisoned").query = query;
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().expect("lock poisoned").navigations.clone()
    }

    pub fn query_sets(&self) -> Vec<UrlQuery> {
        self.state.lock().expect("lock poisoned").query_sets.clone()
    }
}

impl LocationService for FakeLocation {
    fn path(&self) -> String {
        self.state.lock().expect("lock poisoned").path.clone()
    }

    fn query(&self) -> UrlQuery {
        self.state.lock().expect("lock poisoned").query.clone()
    }

    fn set_query(&self, query: UrlQuery) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.query = query.clone();
        state.query_sets.push(query);
    }

    fn navigate(&self, path: &str) {
        self.state
            .lock()
            .expect("lock poisoned")
            .navigations
            .push(path.to_string());
    }

    fn base_path(&self) -> String {
        self.base.clone()
    }
}

/// Controllable focus surface with a blur counter.
#[derive(Default)]
pub struct FakeFocus {
    focused: Mutex<Option<FocusedElement>>,
    typeahead: Mutex<bool>,
    blurs: AtomicUsize,
}

impl FakeFocus {
    pub fn set_focused(&self, element: Option<FocusedElement>) {
        *self.focused.lock().expect("lock poisoned") = element;
    }

    pub fn set_typeahead_open(&self, open: bool) {
        *self.typeahead.lock().expect("lock poisoned") = open;
    }

    pub fn blur_count(&self) -> usize {
        self.blurs.load(Ordering::SeqCst)
    }
}

impl FocusSurface for FakeFocus {
    fn typeahead_open(&self) -> bool {
        *self.typeahead.lock().expect("lock poisoned")
    }

    fn focused_element(&self) -> Option<FocusedElement> {
        *self.focused.lock().expect("lock poisoned")
    }

    fn blur(&self) {
        self.blurs.fetch_add(1, Ordering::SeqCst);
        *self.focused.lock().expect("lock poisoned") = None;
    }
}

pub struct FakeUser {
    pub explore_access: bool,
}

impl UserContext for FakeUser {
    fn has_access_to_explore(&self) -> bool {
        self.explore_access
    }
}

/// Explore gateway returning preconfigured results.
#[derive(Default)]
pub struct FakeExplore {
    pub datasource: Mutex<Option<Datasource>>,
    pub url: Mutex<Option<String>>,
    resolve_calls: AtomicUsize,
}

impl FakeExplore {
    pub fn returning(datasource: &str, url: &str) -> Self {
        let fake = Self::default();
        *fake.datasource.lock().expect("lock poisoned") = Some(Datasource {
            name: datasource.to_string(),
        });
        *fake.url.lock().expect("lock poisoned") = Some(url.to_string());
        fake
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

impl ExploreGateway for FakeExplore {
    fn resolve_datasource(
        &self,
        _datasource: Option<&DataSourceRef>,
    ) -> BoxFuture<'static, Option<Datasource>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.datasource.lock().expect("lock poisoned").clone();
        async move { result }.boxed()
    }

    fn build_explore_url(
        &self,
        _panel: &Panel,
        _datasource: &Datasource,
    ) -> BoxFuture<'static, Option<String>> {
        let result = self.url.lock().expect("lock poisoned").clone();
        async move { result }.boxed()
    }
}

/// In-memory dashboard with counters for every mutating operation.
pub struct FakeDashboard {
    pub panels: Vec<Panel>,
    pub focus: Option<PanelId>,
    pub can_edit: bool,
    pub tooltip: TooltipMode,
    pub refreshes: usize,
    pub duplicated: Vec<usize>,
    pub legend_toggled: Vec<PanelId>,
    pub all_legend_toggles: usize,
    pub collapses: usize,
    pub expands: usize,
}

impl FakeDashboard {
    pub fn with_panels(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            focus: None,
            can_edit: true,
            tooltip: TooltipMode::Default,
            refreshes: 0,
            duplicated: Vec::new(),
            legend_toggled: Vec::new(),
            all_legend_toggles: 0,
            collapses: 0,
            expands: 0,
        }
    }
}

impl DashboardHandle for FakeDashboard {
    fn focus_panel_id(&self) -> Option<PanelId> {
        self.focus
    }

    fn set_focus_panel(&mut self, id: Option<PanelId>) {
        self.focus = id;
    }

    fn can_edit(&self) -> bool {
        self.can_edit
    }

    fn graph_tooltip(&self) -> TooltipMode {
        self.tooltip
    }

    fn set_graph_tooltip(&mut self, mode: TooltipMode) {
        self.tooltip = mode;
    }

    fn panel_by_id(&self, id: PanelId) -> Option<Panel> {
        self.panels.iter().find(|p| p.id == id).cloned()
    }

    fn panel_info_by_id(&self, id: PanelId) -> Option<PanelInfo> {
        self.panels
            .iter()
            .position(|p| p.id == id)
            .map(|index| PanelInfo {
                panel: self.panels[index].clone(),
                index,
            })
    }

    fn duplicate_panel(&mut self, index: usize) {
        self.duplicated.push(index);
    }

    fn toggle_panel_legend(&mut self, id: PanelId) {
        self.legend_toggled.push(id);
        if let Some(panel) = self.panels.iter_mut().find(|p| p.id == id)
            && let Some(legend) = panel.legend.as_mut()
        {
            legend.show = !legend.show;
        }
    }

    fn toggle_legends_for_all(&mut self) {
        self.all_legend_toggles += 1;
    }

    fn collapse_rows(&mut self) {
        self.collapses += 1;
    }

    fn expand_rows(&mut self) {
        self.expands += 1;
    }

    fn start_refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Everything a test needs: the service plus handles to all its fakes.
pub struct Harness {
    pub service: Arc<KeybindingService>,
    pub bus: Arc<EventBus>,
    pub location: Arc<FakeLocation>,
    pub focus: Arc<FakeFocus>,
    pub explore: Arc<FakeExplore>,
    pub events: EventLog,
}

pub fn harness() -> Harness {
    harness_with(FakeLocation::at("/d/abc/test-dashboard"), true)
}

pub fn harness_at(path: &str) -> Harness {
    harness_with(FakeLocation::at(path), true)
}

pub fn harness_without_explore() -> Harness {
    harness_with(FakeLocation::at("/d/abc/test-dashboard"), false)
}

pub fn harness_with(location: FakeLocation, explore_access: bool) -> Harness {
    harness_full(location, explore_access, FakeExplore::default())
}

pub fn harness_full(location: FakeLocation, explore_access: bool, explore: FakeExplore) -> Harness {
    let bus = Arc::new(EventBus::new());
    let location = Arc::new(location);
    let focus = Arc::new(FakeFocus::default());
    let explore = Arc::new(explore);
    let events = EventLog::attach(&bus);

    let service = KeybindingService::new(
        Arc::clone(&bus),
        Arc::clone(&location) as Arc<dyn LocationService>,
        Arc::clone(&focus) as Arc<dyn FocusSurface>,
        Arc::new(FakeUser { explore_access }),
        Arc::clone(&explore) as Arc<dyn ExploreGateway>,
    )
    .expect("service construction");

    Harness {
        service,
        bus,
        location,
        focus,
        explore,
        events,
    }
}

/// A minimal panel for dashboard tests.
pub fn panel(id: u64) -> Panel {
    Panel {
        id: PanelId(id),
        title: format!("Panel {id}"),
        datasource: Some(DataSourceRef("prometheus".to_string())),
        targets: vec![gridview_shortcuts::Target {
            ref_id: "A".to_string(),
            query: "up".to_string(),
        }],
        legend: Some(gridview_shortcuts::LegendOptions { show: true }),
    }
}
