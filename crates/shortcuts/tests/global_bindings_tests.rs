//! Integration tests for the global command table and route-change
//! teardown.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gridview_shortcuts::{AppEvent, BindingMode, KeyOutcome, ModalKind};
use support::*;

/// Chords installed by the global table: ?, h, g h, g a, g p, s o, f, esc.
const GLOBAL_CHORD_COUNT: usize = 8;

#[test]
fn help_chords_open_the_help_modal() {
    let h = harness();

    for event in [key('?'), key('h')] {
        h.events.take();
        assert_eq!(h.service.handle_key(event), KeyOutcome::Fired);
        let events = h.events.take();
        assert!(
            events.contains(&AppEvent::ShowModal(ModalKind::Help)),
            "expected help modal from {event:?}, got {events:?}"
        );
    }
}

#[test]
fn navigation_chords_navigate() {
    let h = harness();

    assert_eq!(h.service.handle_key(key('g')), KeyOutcome::Pending);
    assert_eq!(h.service.handle_key(key('h')), KeyOutcome::Fired);
    assert_eq!(h.location.navigations(), vec!["/".to_string()]);

    h.service.handle_key(key('g'));
    h.service.handle_key(key('a'));
    h.service.handle_key(key('g'));
    h.service.handle_key(key('p'));
    assert_eq!(
        h.location.navigations(),
        vec!["/".to_string(), "/alerting".to_string(), "/profile".to_string()]
    );
}

#[test]
fn search_opens_from_both_chords() {
    let h = harness();

    h.service.handle_key(key('s'));
    h.service.handle_key(key('o'));
    h.service.handle_key(key('f'));

    let searches = h
        .events
        .take()
        .into_iter()
        .filter(|e| *e == AppEvent::ShowDashSearch)
        .count();
    assert_eq!(searches, 2);
}

#[test]
fn escape_is_bound_scoped_and_global() {
    let h = harness();
    assert!(h.service.is_bound("esc", BindingMode::Scoped).unwrap());
    assert!(h.service.is_bound("esc", BindingMode::Global).unwrap());
}

#[test]
fn no_bindings_installed_on_login_route() {
    let h = harness_at("/login");
    assert_eq!(h.service.binding_count(), 0);
    assert_eq!(h.service.handle_key(key('f')), KeyOutcome::Unbound);
}

#[test]
fn route_change_drops_dashboard_bindings_and_keeps_global_set() {
    let h = harness();
    let dash = Arc::new(std::sync::Mutex::new(FakeDashboard::with_panels(vec![
        panel(1),
    ])));
    h.service
        .setup_dashboard_bindings(dash.clone())
        .expect("dashboard bindings");
    assert!(h.service.binding_count() > GLOBAL_CHORD_COUNT);

    h.bus.emit(AppEvent::RouteChanged {
        path: "/d/other".to_string(),
    });

    // exactly the global set survives
    assert_eq!(h.service.binding_count(), GLOBAL_CHORD_COUNT);

    // a dashboard chord no longer reaches its handler
    h.service.handle_key(key('d'));
    h.service.handle_key(key('r'));
    assert_eq!(dash.lock().expect("lock poisoned").refreshes, 0);

    // while a global chord still works
    h.service.handle_key(key('g'));
    h.service.handle_key(key('h'));
    assert_eq!(h.location.navigations(), vec!["/".to_string()]);
}

#[test]
fn rebinding_a_chord_replaces_the_handler() {
    let h = harness();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    h.service
        .bind("d r", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    let counter = Arc::clone(&second);
    h.service
        .bind("d r", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    h.service.handle_key(key('d'));
    assert_eq!(h.service.handle_key(key('r')), KeyOutcome::Fired);

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn unbind_removes_a_single_chord() {
    let h = harness();
    h.service.unbind("f", Some(BindingMode::Scoped)).unwrap();
    assert_eq!(h.service.handle_key(key('f')), KeyOutcome::Unbound);
    // other chords unaffected
    assert_eq!(h.service.handle_key(key('?')), KeyOutcome::Fired);
}

#[test]
fn scoped_chords_are_suppressed_while_editing() {
    let h = harness();
    h.focus
        .set_focused(Some(gridview_shortcuts::FocusedElement::TextInput));

    assert_eq!(h.service.handle_key(key('f')), KeyOutcome::Unbound);
    assert!(h.events.take().is_empty());
}
