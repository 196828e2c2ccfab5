//! End-to-end flows through the public field API.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sift_core::{TimerId, TimerManager};
use sift_select::{
    Environment, FieldEvent, Key, KeyPressEvent, Point, Rect, SearchableSelectField,
};

struct HostEnvironment {
    anchor: Option<Rect>,
    viewport: Rect,
    timers: TimerManager,
    last_timer: Option<TimerId>,
}

impl HostEnvironment {
    fn new() -> Self {
        Self {
            anchor: Some(Rect::new(40.0, 100.0, 240.0, 32.0)),
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            timers: TimerManager::new(),
            last_timer: None,
        }
    }
}

impl Environment for HostEnvironment {
    fn anchor_rect(&self) -> Option<Rect> {
        self.anchor
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    fn start_timer(&mut self, duration: Duration) -> TimerId {
        let id = self.timers.start_one_shot(duration);
        self.last_timer = Some(id);
        id
    }

    fn stop_timer(&mut self, id: TimerId) {
        let _ = self.timers.stop(id);
    }

    fn watch_pointer_down(&mut self) {}
    fn unwatch_pointer_down(&mut self) {}
    fn watch_viewport(&mut self) {}
    fn unwatch_viewport(&mut self) {}
}

fn schools() -> SearchableSelectField {
    SearchableSelectField::new()
        .with_options([
            ("harvard", "Harvard University"),
            ("stanford", "Stanford University"),
            ("hamburg", "Hamburg University"),
            ("mit", "MIT"),
        ])
        .with_popular(["mit"])
        .with_label("School")
}

#[test]
fn full_keyboard_journey() {
    let mut field = schools();
    let mut env = HostEnvironment::new();

    let commits: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&commits);
    field.value_changed.connect(move |value: &String| {
        sink.lock().push(value.clone());
    });

    // Focus and type; the panel opens and filters as the query grows.
    field.handle_event(FieldEvent::FocusIn, &mut env);
    field.handle_event(FieldEvent::TextEdited("uni".into()), &mut env);
    assert!(field.is_open());
    assert_eq!(field.filtered_options().len(), 3);

    // Let the debounce elapse; the typed text reaches the parent once.
    let timer = env.last_timer.unwrap();
    field.handle_event(FieldEvent::Timer(timer), &mut env);
    assert_eq!(*commits.lock(), ["uni"]);

    // Navigate down and confirm with Enter.
    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown)), &mut env);
    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::Enter)), &mut env);

    assert_eq!(commits.lock().len(), 2);
    assert_eq!(commits.lock()[1], "stanford");
    assert_eq!(field.staged_text(), "Stanford University");
    assert!(!field.is_open());

    // Blur with a clean field is quiet.
    field.handle_event(FieldEvent::FocusOut, &mut env);
    assert_eq!(commits.lock().len(), 2);
}

#[test]
fn pointer_journey_with_blur_race() {
    let mut field = schools();
    let mut env = HostEnvironment::new();

    let commits: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&commits);
    field.value_changed.connect(move |value: &String| {
        sink.lock().push(value.clone());
    });

    field.handle_event(FieldEvent::FocusIn, &mut env);
    field.handle_event(FieldEvent::TextEdited("Ham".into()), &mut env);
    let pending = env.last_timer.unwrap();

    // The user clicks the option before the debounce fires. Native order:
    // pointer-down, blur, click.
    field.handle_event(FieldEvent::OptionPressed(0), &mut env);
    field.handle_event(FieldEvent::FocusOut, &mut env);
    field.handle_event(FieldEvent::OptionClicked(0), &mut env);

    assert_eq!(*commits.lock(), ["hamburg"]);
    assert_eq!(field.staged_text(), "Hamburg University");

    // The debounced "Ham" was cancelled; a stale fire changes nothing.
    field.handle_event(FieldEvent::Timer(pending), &mut env);
    assert_eq!(*commits.lock(), ["hamburg"]);
}

#[test]
fn dismissal_and_reopen() {
    let mut field = schools();
    let mut env = HostEnvironment::new();

    field.handle_event(FieldEvent::FocusIn, &mut env);
    field.handle_event(FieldEvent::TextEdited("u".into()), &mut env);
    assert!(field.is_open());

    // Click far away; the panel dismisses, the text stays staged.
    field.handle_event(FieldEvent::GlobalPointerDown(Point::new(900.0, 700.0)), &mut env);
    assert!(!field.is_open());
    assert_eq!(field.staged_text(), "u");

    // ArrowDown reopens over the same query; the open highlights the
    // first option and the press then moves past it.
    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown)), &mut env);
    assert!(field.is_open());
    assert_eq!(field.active_index(), 1);
}

#[test]
fn empty_query_shows_head_slice_and_popular_ranks_matches() {
    let mut field = schools();
    let mut env = HostEnvironment::new();

    // Opening with no query shows the options in their original order.
    field.handle_event(FieldEvent::FocusIn, &mut env);
    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown)), &mut env);
    assert_eq!(field.filtered_options()[0].value, "harvard");
    assert_eq!(field.filtered_options().len(), 4);

    // Under a query, popular values outrank ordinary matches.
    field.handle_event(FieldEvent::TextEdited("i".into()), &mut env);
    assert_eq!(field.filtered_options()[0].value, "mit");
}
