//! Keybinding dispatch service.
//!
//! This module contains the service façade wiring the chord registry, the
//! UI-state snapshot and the notification bus together, plus the
//! process-wide singleton accessor.
//!
//! The module is organized into submodules:
//! - `bindings`: the global and dashboard-scoped command tables
//! - `escape`: the escape resolver and the global escape guard

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use crossterm::event::KeyEvent;
use gridview_keys::{
    BindingMode, Chord, ChordError, ChordRegistry, DEFAULT_SEQUENCE_TIMEOUT, KeyOutcome,
};
use tracing::{debug, error};

use crate::bus::EventBus;
use crate::event::EventKind;
use crate::explore::{ExploreGateway, UserContext};
use crate::focus::FocusSurface;
use crate::location::LocationService;
use crate::state::UiState;

mod bindings;
mod escape;

/// Tunables for the keybinding service.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// How long a multi-key prefix stays pending before it expires.
    pub sequence_timeout: Duration,
    /// Route path on which no shortcuts are installed.
    pub login_path: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            sequence_timeout: DEFAULT_SEQUENCE_TIMEOUT,
            login_path: "/login".to_string(),
        }
    }
}

/// Maps key chords to application commands and resolves which command
/// applies given the transient UI state.
///
/// Construction installs the global command table and subscribes to the
/// notifications that keep the [`UiState`] snapshot current. On every
/// route change the whole table is cleared and the global set rebuilt, so
/// no dashboard-scoped handler outlives its owning view.
pub struct KeybindingService {
    registry: Mutex<ChordRegistry>,
    state: Arc<Mutex<UiState>>,
    bus: Arc<EventBus>,
    location: Arc<dyn LocationService>,
    focus: Arc<dyn FocusSurface>,
    user: Arc<dyn UserContext>,
    explore: Arc<dyn ExploreGateway>,
    options: ServiceOptions,
}

impl KeybindingService {
    /// Create a service with default options. See
    /// [`with_options`](Self::with_options).
    pub fn new(
        bus: Arc<EventBus>,
        location: Arc<dyn LocationService>,
        focus: Arc<dyn FocusSurface>,
        user: Arc<dyn UserContext>,
        explore: Arc<dyn ExploreGateway>,
    ) -> Result<Arc<Self>, ChordError> {
        Self::with_options(ServiceOptions::default(), bus, location, focus, user, explore)
    }

    /// Create a service, subscribe it to UI-state and route notifications,
    /// and install the global command table.
    pub fn with_options(
        options: ServiceOptions,
        bus: Arc<EventBus>,
        location: Arc<dyn LocationService>,
        focus: Arc<dyn FocusSurface>,
        user: Arc<dyn UserContext>,
        explore: Arc<dyn ExploreGateway>,
    ) -> Result<Arc<Self>, ChordError> {
        let state = Arc::new(Mutex::new(UiState::default()));
        let service = Arc::new(Self {
            registry: Mutex::new(ChordRegistry::with_timeout(options.sequence_timeout)),
            state: Arc::clone(&state),
            bus: Arc::clone(&bus),
            location,
            focus,
            user,
            explore,
            options,
        });

        // These four subscriptions are the only writers of the snapshot
        // besides the escape resolver.
        let s = Arc::clone(&state);
        bus.subscribe(EventKind::ShowModal, move |_| {
            s.lock().expect("lock poisoned").modal_open = true;
        });
        let s = Arc::clone(&state);
        bus.subscribe(EventKind::HideModal, move |_| {
            s.lock().expect("lock poisoned").modal_open = false;
        });
        let s = Arc::clone(&state);
        bus.subscribe(EventKind::TimepickerOpened, move |_| {
            s.lock().expect("lock poisoned").timepicker_open = true;
        });
        let s = Arc::clone(&state);
        bus.subscribe(EventKind::TimepickerClosed, move |_| {
            s.lock().expect("lock poisoned").timepicker_open = false;
        });

        // Shortcuts never leak between views: clear everything on route
        // change and rebuild the global set.
        let weak = Arc::downgrade(&service);
        bus.subscribe(EventKind::RouteChanged, move |_| {
            let Some(service) = weak.upgrade() else {
                return;
            };
            debug!("route changed, rebuilding global bindings");
            service.clear_all();
            if let Err(err) = service.setup_global_bindings() {
                error!(%err, "failed to rebuild global bindings after route change");
            }
        });

        service.setup_global_bindings()?;
        Ok(service)
    }

    /// Bind a scoped handler (suppressed while an editable element has
    /// focus). Rebinding the same chord replaces the previous handler.
    pub fn bind(
        &self,
        chord: &str,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Result<(), ChordError> {
        let chord = Chord::parse(chord)?;
        self.registry
            .lock()
            .expect("lock poisoned")
            .register(chord, BindingMode::Scoped, Arc::new(handler));
        Ok(())
    }

    /// Bind a global handler (fires regardless of focus).
    pub fn bind_global(
        &self,
        chord: &str,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Result<(), ChordError> {
        let chord = Chord::parse(chord)?;
        self.registry
            .lock()
            .expect("lock poisoned")
            .register(chord, BindingMode::Global, Arc::new(handler));
        Ok(())
    }

    /// Remove a chord's handler for one mode, or both when `mode` is
    /// `None`.
    pub fn unbind(&self, chord: &str, mode: Option<BindingMode>) -> Result<(), ChordError> {
        let chord = Chord::parse(chord)?;
        self.registry
            .lock()
            .expect("lock poisoned")
            .unregister(&chord, mode);
        Ok(())
    }

    /// Remove every registered chord, both scoped and global.
    pub fn clear_all(&self) {
        self.registry.lock().expect("lock poisoned").clear_all();
    }

    /// Number of chords with at least one handler.
    pub fn binding_count(&self) -> usize {
        self.registry.lock().expect("lock poisoned").len()
    }

    /// True if the chord has a handler in the given mode.
    pub fn is_bound(&self, chord: &str, mode: BindingMode) -> Result<bool, ChordError> {
        let chord = Chord::parse(chord)?;
        Ok(self
            .registry
            .lock()
            .expect("lock poisoned")
            .is_bound(&chord, mode))
    }

    /// Feed one terminal key event through the service.
    ///
    /// Focus is read from the focus capability at dispatch time; the
    /// matched handler runs on the calling thread after the registry lock
    /// is released.
    pub fn handle_key(&self, event: KeyEvent) -> KeyOutcome {
        let input_focused = self
            .focus
            .focused_element()
            .is_some_and(|element| element.is_editable());
        let (outcome, handler) = self
            .registry
            .lock()
            .expect("lock poisoned")
            .advance(event, input_focused);
        if let Some(handler) = handler {
            handler();
        }
        outcome
    }

    /// Current copy of the UI-state snapshot.
    pub fn ui_state(&self) -> UiState {
        *self.state.lock().expect("lock poisoned")
    }
}

static INSTANCE: RwLock<Option<Arc<KeybindingService>>> = RwLock::new(None);

/// Install the process-wide service instance, replacing any previous one.
pub fn set_keybinding_service(service: Arc<KeybindingService>) {
    *INSTANCE.write().expect("lock poisoned") = Some(service);
}

/// The process-wide service instance, if one has been set.
pub fn try_keybinding_service() -> Option<Arc<KeybindingService>> {
    INSTANCE.read().expect("lock poisoned").clone()
}

/// The process-wide service instance.
///
/// # Panics
///
/// Panics when called before [`set_keybinding_service`]. Reading the
/// singleton before the composition root installs it is a programming
/// error, not a runtime condition to recover from.
pub fn keybinding_service() -> Arc<KeybindingService> {
    try_keybinding_service()
        .expect("keybinding service accessed before set_keybinding_service was called")
}
