//! Integration tests for cellkit.
//!
//! These tests exercise the public API from outside the crate: screens,
//! focus traversal, colors and drawing working together on a headless
//! terminal.

use cellkit::color::{Attr, ColorRegistry};
use cellkit::draw::{draw_custom_box, write_text, Axis, CustomBox};
use cellkit::event::{bind, BindAction, BindData, Key, KeyEvent, Signal};
use cellkit::geometry::Region;
use cellkit::render::Display;
use cellkit::testing::{surface_to_string, EventLog, HeadlessBackend, Pilot, Probe};
use cellkit::{AppConfig, ExitStatus, Screen, Traversal, Widget, WidgetId};
use pretty_assertions::assert_eq;

fn display(width: u16, height: u16) -> Display {
    let (backend, _) = HeadlessBackend::new(width, height);
    Display::new(Box::new(backend), true).unwrap()
}

fn probe(display: &mut Display, log: &EventLog, name: &str) -> Box<dyn Widget> {
    Box::new(Probe::new(display, name, Region::new(0, 0, 4, 3), log).unwrap())
}

fn names(screen: &Screen) -> Vec<String> {
    screen
        .ids()
        .iter()
        .filter_map(|id| screen.get::<Probe>(*id))
        .map(|p| p.name().to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn test_registry_growth_keeps_order() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    let mut expected = Vec::new();
    for n in 0..30 {
        let name = format!("w{n}");
        screen.register(probe(&mut d, &log, &name));
        expected.push(name);
        assert!(screen.capacity() >= screen.count() + 1);
    }
    assert_eq!(names(&screen), expected);
}

#[test]
fn test_unregister_resequences_every_position() {
    for removed in 0..5 {
        let mut d = display(40, 10);
        let log = EventLog::new();
        let mut screen = Screen::new(d.root());
        let ids: Vec<WidgetId> = (0..5).map(|n| screen.register(probe(&mut d, &log, &format!("w{n}")))).collect();

        screen.unregister(ids[removed]);
        assert_eq!(screen.count(), 4);
        for (j, id) in ids.iter().enumerate() {
            let expected = match j {
                j if j < removed => Some(j),
                j if j == removed => None,
                j => Some(j - 1),
            };
            assert_eq!(screen.index_of(*id), expected, "removed {removed}, widget {j}");
        }
    }
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn test_focus_wraparound_visits_every_focusable_widget() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    let focusable = [true, false, true, true, false];
    for (n, accepts) in focusable.iter().enumerate() {
        let p = Probe::new(&mut d, &format!("w{n}"), Region::new(0, 0, 4, 3), &log)
            .unwrap()
            .focusable(*accepts);
        screen.register(Box::new(p));
    }
    for start in 0..focusable.len() {
        screen.focus_on(screen.widget_at(start).unwrap());
        let mut visited = Vec::new();
        for _ in 0..3 {
            visited.push(screen.focus_next().and_then(|id| screen.index_of(id)).unwrap());
        }
        visited.sort_unstable();
        assert_eq!(visited, vec![0, 2, 3], "start {start}");
    }
}

#[test]
fn test_no_focusable_widget_means_no_focus() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    for n in 0..3 {
        let p = Probe::new(&mut d, &format!("w{n}"), Region::new(0, 0, 4, 3), &log)
            .unwrap()
            .focusable(false);
        screen.register(Box::new(p));
    }
    for _ in 0..4 {
        assert_eq!(screen.focus_next(), None);
        assert_eq!(screen.focus_index(), None);
    }
}

#[test]
fn test_focus_scenario_unregister_middle() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    let a = screen.register(probe(&mut d, &log, "a"));
    let b = screen.register(probe(&mut d, &log, "b"));
    let c = screen.register(probe(&mut d, &log, "c"));

    assert_eq!(screen.focus_first(), Some(a));
    assert_eq!(screen.focus_next(), Some(b));
    screen.unregister(b);
    screen.focus_on(a);
    assert_eq!(screen.focus_next(), Some(c));
}

// ---------------------------------------------------------------------------
// Paint order
// ---------------------------------------------------------------------------

#[test]
fn test_raise_paints_last() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    let a = screen.register(probe(&mut d, &log, "a"));
    screen.register(probe(&mut d, &log, "b"));
    screen.register(probe(&mut d, &log, "c"));
    screen.raise(a);
    screen.refresh(&mut d);
    let draws = log.matching(".draw");
    assert_eq!(draws.last().map(String::as_str), Some("a.draw"));
    assert_eq!(draws.len(), 3);
    assert_eq!(d.frame().row_text(1).trim_end(), "│a │");
}

#[test]
fn test_lower_paints_first() {
    let mut d = display(40, 10);
    let log = EventLog::new();
    let mut screen = Screen::new(d.root());
    screen.register(probe(&mut d, &log, "a"));
    screen.register(probe(&mut d, &log, "b"));
    let c = screen.register(probe(&mut d, &log, "c"));
    screen.lower(c);
    screen.refresh(&mut d);
    assert_eq!(log.matching(".draw").first().map(String::as_str), Some("c.draw"));
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

#[test]
fn test_color_fallback() {
    let uninitialized = ColorRegistry::new();
    assert_eq!(uninitialized.lookup("red_black"), Attr::NORMAL);
    assert_eq!(uninitialized.lookup("bold"), Attr::BOLD);

    let mut registry = ColorRegistry::new();
    registry.init(true);
    assert_eq!(registry.lookup("nonexistent-label"), Attr::NORMAL);
    assert_ne!(registry.lookup("red_black"), Attr::NORMAL);
    assert_eq!(registry.lookup("bold"), Attr::BOLD);
}

#[test]
fn test_no_color_terminal_scenario() {
    let (backend, _) = HeadlessBackend::without_colors(20, 5);
    let d = Display::new(Box::new(backend), true).unwrap();
    assert!(d.colors().is_empty());
    assert_eq!(d.color("red_black"), Attr::NORMAL);
    assert_eq!(d.color("bold"), Attr::BOLD);
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

#[test]
fn test_clipped_write_stops_at_edge() {
    let mut d = display(20, 5);
    let id = d.create_surface(Region::new(0, 0, 8, 1)).unwrap();
    let written = write_text(&mut d, id, 5, 0, "abcdefgh", Attr::NORMAL, Axis::Horizontal, 0, 8);
    assert_eq!(written, 3);
    assert_eq!(surface_to_string(&d, id), "     abc");
}

#[test]
fn test_horizontal_only_custom_box_repaints_once() {
    let mut d = display(20, 6);
    let id = d.create_surface(Region::new(1, 1, 6, 4)).unwrap();
    let before = d.refresh_count();
    draw_custom_box(&mut d, id, &CustomBox::horizontal('='), Attr::NORMAL);
    assert_eq!(d.refresh_count(), before + 1);
    insta::assert_snapshot!(surface_to_string(&d, id), @r"
    ======


    ======
    ");
}

#[test]
fn test_empty_custom_box_does_not_repaint() {
    let mut d = display(20, 6);
    let id = d.create_surface(Region::new(1, 1, 6, 4)).unwrap();
    let before = d.refresh_count();
    draw_custom_box(&mut d, id, &CustomBox::default(), Attr::NORMAL);
    assert_eq!(d.refresh_count(), before);
}

// ---------------------------------------------------------------------------
// Traversal through the pilot
// ---------------------------------------------------------------------------

#[test]
fn test_pilot_commit_saves_all_widgets() {
    let mut pilot = Pilot::new(30, 8);
    let s = pilot.app_mut().add_screen();
    pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    pilot.add_probe(s, "b", Region::new(7, 0, 6, 3)).unwrap();
    pilot.press_keys([KeyEvent::plain(Key::Tab), KeyEvent::plain(Key::F(10))]);
    assert!(pilot.run(s));
    assert_eq!(pilot.log().matching(".save"), vec!["a.save", "b.save"]);
    insta::assert_snapshot!(pilot.screen_text(), @r"
    ┌────┐ ┌────┐
    │a   │ │b   │
    └────┘ └────┘
    ");
}

#[test]
fn test_pilot_cancel_skips_save() {
    let mut pilot = Pilot::new(30, 8);
    let s = pilot.app_mut().add_screen();
    pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    pilot.press(KeyEvent::ctrl('x'));
    assert!(!pilot.run(s));
    assert!(pilot.log().matching(".save").is_empty());
    assert_eq!(pilot.screen(s).map(Screen::exit_status), Some(ExitStatus::Cancel));
}

#[test]
fn test_pilot_config_keys() {
    let config = AppConfig::new().with_keys(cellkit::TraversalKeys {
        commit: KeyEvent::ctrl('s'),
        ..Default::default()
    });
    let mut pilot = Pilot::with_config(30, 8, config);
    let s = pilot.app_mut().add_screen();
    pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    pilot.press(KeyEvent::ctrl('s'));
    assert!(pilot.run(s));
}

#[test]
fn test_menu_sub_state_through_app() {
    let mut pilot = Pilot::new(30, 8);
    let s = pilot.app_mut().add_screen();
    pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    pilot
        .add_probe_with(s, "menu", Region::new(0, 4, 8, 3), |p| {
            p.as_menu().focusable(false).returning(Key::Enter, 1)
        })
        .unwrap();
    pilot.press_keys([Key::Escape, Key::Down, Key::Enter, Key::F(10)]);
    let mut traversal = Traversal::default().with_menu_key(|k| k.code == Key::Escape);
    assert!(pilot.app_mut().traverse_with(s, &mut traversal));
    assert_eq!(
        pilot.log().matching("inject"),
        vec!["menu.inject(Down)", "menu.inject(Enter)"]
    );
    assert_eq!(pilot.log().matching("a.focus").len(), 2);
}

#[test]
fn test_bound_key_handler_runs_during_traversal() {
    let mut pilot = Pilot::new(30, 8);
    let s = pilot.app_mut().add_screen();
    let a = pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    let log = pilot.log().clone();
    let widget = pilot.app_mut().screen_mut(s).and_then(|screen| screen.widget_mut(a)).unwrap();
    bind(
        widget,
        KeyEvent::plain(Key::Char('?')),
        BindAction::call(move |w, data, _| {
            log.push(format!("handler({data:?}) on {}", w.core().screen_index().unwrap_or(99)));
            5
        }),
        BindData::Int(3),
    );
    pilot.press_keys([Key::Char('?'), Key::F(10)]);
    assert!(pilot.run(s));
    assert_eq!(pilot.log().matching("handler"), vec!["handler(Int(3)) on 0"]);
}

#[test]
fn test_signals_fire_around_focus_changes_and_destroy() {
    let mut pilot = Pilot::new(30, 8);
    let s = pilot.app_mut().add_screen();
    let a = pilot.add_probe(s, "a", Region::new(0, 0, 6, 3)).unwrap();
    pilot.add_probe(s, "b", Region::new(7, 0, 6, 3)).unwrap();
    let log = pilot.log().clone();
    {
        let signals = &mut pilot.app_mut().screen_mut(s).and_then(|screen| screen.widget_mut(a)).unwrap().core_mut().signals;
        for (signal, label) in [
            (Signal::BeforeLeaving, "a.before"),
            (Signal::AfterLeaving, "a.after"),
            (Signal::Destroy, "a.destroyed"),
        ] {
            let log = log.clone();
            signals.bind_signal(signal, move || log.push(label));
        }
    }
    pilot.press_keys([KeyEvent::plain(Key::Tab), KeyEvent::plain(Key::F(10))]);
    assert!(pilot.run(s));
    assert_eq!(log.matching("a."), vec![
        "a.refresh", "a.focus", "a.draw", "a.before", "a.unfocus", "a.after", "a.save",
    ]);

    log.clear();
    let mut screen = pilot.app_mut().destroy_screen(s).unwrap();
    screen.destroy_widgets(pilot.app_mut().display_mut());
    assert_eq!(log.entries(), vec!["a.erase", "a.destroyed", "a.destroy", "b.erase", "b.destroy"]);
}
