#![forbid(unsafe_code)]

//! Diagnostics emitted through `tracing`.

use std::sync::{Arc, Mutex};

use formkit_core::{Form, FormSnapshot, ValidationSchema};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct Captured {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = String::new();
        event.record(&mut MessageVisitor(&mut text));
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), text));
    }
}

fn capture(f: impl FnOnce()) -> Vec<(Level, String)> {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, f);
    captured.events.lock().unwrap().clone()
}

#[test]
fn unknown_rule_warns_on_install() {
    let events = capture(|| {
        let _form = Form::builder()
            .schema(ValidationSchema::new().rule("phone", "phone-number"))
            .build();
    });
    let warnings: Vec<_> = events.iter().filter(|(l, _)| *l == Level::WARN).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("phone-number"));
}

#[test]
fn field_values_are_not_logged() {
    let events = capture(|| {
        let mut form = Form::builder()
            .schema(ValidationSchema::new().rule("password", "required"))
            .build();
        form.update_field("password", "s3cr3t-value");
        form.submit();
    });
    assert!(!events.is_empty());
    assert!(events.iter().all(|(_, text)| !text.contains("s3cr3t-value")));
}

#[test]
fn blocked_submission_is_reported() {
    let events = capture(|| {
        let mut form = Form::builder()
            .initial(FormSnapshot::new().with("zip", "x"))
            .schema(ValidationSchema::new().rule("zip", "postal-code"))
            .build();
        assert!(form.submit().is_none());
    });
    assert!(
        events
            .iter()
            .any(|(_, text)| text.contains("submission blocked"))
    );
}
