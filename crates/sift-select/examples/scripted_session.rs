//! Drives a field through a scripted session and prints what a host
//! would render at each step.
//!
//! Run with logging to watch the internals:
//!
//! ```text
//! RUST_LOG=sift_select=trace cargo run -p sift-select --example scripted_session
//! ```

use std::time::Duration;

use sift_core::{TimerId, TimerManager};
use sift_select::{
    Environment, FieldEvent, Key, KeyPressEvent, Rect, SearchableSelectField,
};

struct ConsoleHost {
    timers: TimerManager,
}

impl Environment for ConsoleHost {
    fn anchor_rect(&self) -> Option<Rect> {
        Some(Rect::new(40.0, 100.0, 240.0, 32.0))
    }

    fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 1024.0, 768.0)
    }

    fn start_timer(&mut self, duration: Duration) -> TimerId {
        self.timers.start_one_shot(duration)
    }

    fn stop_timer(&mut self, id: TimerId) {
        let _ = self.timers.stop(id);
    }

    fn watch_pointer_down(&mut self) {}
    fn unwatch_pointer_down(&mut self) {}
    fn watch_viewport(&mut self) {}
    fn unwatch_viewport(&mut self) {}
}

fn render(step: &str, field: &SearchableSelectField) {
    println!("-- {step}");
    println!("   input: {:?}", field.display_text());
    if field.is_open() {
        for (index, option) in field.filtered_options().iter().enumerate() {
            let marker = if index as i32 == field.active_index() {
                ">"
            } else {
                " "
            };
            println!("   {marker} {}", option.label);
        }
        if field.shows_no_matches() {
            println!("     (no matches)");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut field = SearchableSelectField::new()
        .with_options([
            ("cs", "Computer Science"),
            ("bio", "Biology"),
            ("biochem", "Biochemistry"),
            ("bus", "Business"),
        ])
        .with_label("Major");

    field.value_changed.connect(|value: &String| {
        println!("   => value_changed({value:?})");
    });

    let mut host = ConsoleHost {
        timers: TimerManager::new(),
    };

    field.handle_event(FieldEvent::FocusIn, &mut host);
    field.handle_event(FieldEvent::TextEdited("bio".into()), &mut host);
    render("typed \"bio\"", &field);

    // Pump the debounce the way a real host would.
    if let Some(wait) = host.timers.time_until_next() {
        std::thread::sleep(wait);
    }
    for fired in host.timers.process_expired() {
        field.handle_event(FieldEvent::Timer(fired), &mut host);
    }
    render("debounce elapsed", &field);

    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown)), &mut host);
    render("arrow down", &field);

    field.handle_event(FieldEvent::KeyPress(KeyPressEvent::new(Key::Enter)), &mut host);
    render("enter", &field);
}
